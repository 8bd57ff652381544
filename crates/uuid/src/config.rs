//! Generator configuration.
//!
//! Configuration is resolved once at process startup and then turned into a generator with
//! [`build_generator`]. Nothing in this module reads the environment; callers decide where the
//! values come from.

use crate::{
    CanonicalUuid, GregorianTimeGenerator, NameBasedGenerator, RandomGenerator,
    TimeOrderedGenerator, UuidError, UuidGenerator, UuidResult, UuidVersion,
};

/// Which generator to build, and the inputs it needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    version: UuidVersion,
    namespace: Option<CanonicalUuid>,
    name: Option<String>,
    node_id: Option<[u8; 6]>,
}

impl GeneratorConfig {
    /// Create a new `GeneratorConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] when:
    /// - a name-based version is missing its namespace or name,
    /// - a namespace or name is given for a version that does not hash one,
    /// - a node id is given for anything other than version 1.
    pub fn new(
        version: UuidVersion,
        namespace: Option<CanonicalUuid>,
        name: Option<String>,
        node_id: Option<[u8; 6]>,
    ) -> UuidResult<Self> {
        if version.is_name_based() {
            if namespace.is_none() || name.is_none() {
                return Err(UuidError::InvalidInput(format!(
                    "{} requires both a namespace and a name",
                    version
                )));
            }
        } else if namespace.is_some() || name.is_some() {
            return Err(UuidError::InvalidInput(format!(
                "{} does not take a namespace or name",
                version
            )));
        }

        if node_id.is_some() && version != UuidVersion::V1 {
            return Err(UuidError::InvalidInput(format!(
                "{} does not take a node id",
                version
            )));
        }

        Ok(Self {
            version,
            namespace,
            name,
            node_id,
        })
    }

    pub fn version(&self) -> UuidVersion {
        self.version
    }

    pub fn namespace(&self) -> Option<&CanonicalUuid> {
        self.namespace.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn node_id(&self) -> Option<[u8; 6]> {
        self.node_id
    }
}

/// Builds the system-backed generator described by `config`.
///
/// # Errors
///
/// Version 1 without a configured node id draws a random one, which can fail with
/// [`UuidError::EntropyUnavailable`].
pub fn build_generator(config: &GeneratorConfig) -> UuidResult<Box<dyn UuidGenerator>> {
    let generator: Box<dyn UuidGenerator> = match config.version {
        UuidVersion::V1 => Box::new(GregorianTimeGenerator::with_parts(
            crate::SystemClock,
            crate::OsRandom,
            config.node_id,
        )?),
        UuidVersion::V3 | UuidVersion::V5 => {
            let (Some(namespace), Some(name)) = (config.namespace(), config.name()) else {
                return Err(UuidError::InvalidInput(format!(
                    "{} requires both a namespace and a name",
                    config.version
                )));
            };
            Box::new(NameBasedGenerator::new(config.version, namespace, name)?)
        }
        UuidVersion::V4 => Box::new(RandomGenerator::new()),
        UuidVersion::V7 => Box::new(TimeOrderedGenerator::new()),
    };

    tracing::debug!("built {} uuid generator", generator.version());
    Ok(generator)
}

/// Parses a 48-bit node id.
///
/// Accepts six colon- or hyphen-separated octets (`01:23:45:67:89:ab`) or twelve bare hex
/// digits. One separator is used throughout; mixing them is rejected. Hex digits may be either
/// case.
pub fn parse_node_id(input: &str) -> UuidResult<[u8; 6]> {
    let invalid = || {
        UuidError::InvalidInput(format!(
            "node id must be 6 hex octets such as 01:23:45:67:89:ab, got: '{}'",
            input
        ))
    };

    let separator = input.chars().find(|c| matches!(c, ':' | '-'));
    let digits: String = if let Some(separator) = separator {
        let octets: Vec<&str> = input.split(separator).collect();
        if octets.len() != 6 || octets.iter().any(|o| o.len() != 2) {
            return Err(invalid());
        }
        octets.concat()
    } else {
        input.to_string()
    };

    if digits.len() != 12 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let mut node_id = [0u8; 6];
    for (i, octet) in node_id.iter_mut().enumerate() {
        *octet = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
    }
    Ok(node_id)
}

/// Parses a namespace: one of `dns`, `url`, `oid`, `x500` (any case), or a canonical UUID.
pub fn parse_namespace(input: &str) -> UuidResult<CanonicalUuid> {
    match input.to_ascii_lowercase().as_str() {
        "dns" => Ok(CanonicalUuid::NAMESPACE_DNS),
        "url" => Ok(CanonicalUuid::NAMESPACE_URL),
        "oid" => Ok(CanonicalUuid::NAMESPACE_OID),
        "x500" => Ok(CanonicalUuid::NAMESPACE_X500),
        _ => CanonicalUuid::parse(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_name_based_requires_namespace_and_name() {
        let result = GeneratorConfig::new(UuidVersion::V5, None, Some("x".into()), None);

        match result {
            Err(UuidError::InvalidInput(msg)) => assert!(msg.contains("requires both")),
            _ => panic!("Expected InvalidInput error"),
        }
        assert!(GeneratorConfig::new(
            UuidVersion::V3,
            Some(CanonicalUuid::NAMESPACE_DNS),
            None,
            None
        )
        .is_err());
    }

    #[test]
    fn test_new_rejects_name_for_random_version() {
        let result = GeneratorConfig::new(UuidVersion::V4, None, Some("x".into()), None);

        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_node_id_outside_v1() {
        let result = GeneratorConfig::new(UuidVersion::V7, None, None, Some([0; 6]));

        match result {
            Err(UuidError::InvalidInput(msg)) => assert!(msg.contains("node id")),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_accessors() {
        let config = GeneratorConfig::new(
            UuidVersion::V5,
            Some(CanonicalUuid::NAMESPACE_URL),
            Some("https://example.org".into()),
            None,
        )
        .unwrap();

        assert_eq!(config.version(), UuidVersion::V5);
        assert_eq!(config.namespace(), Some(&CanonicalUuid::NAMESPACE_URL));
        assert_eq!(config.name(), Some("https://example.org"));
        assert_eq!(config.node_id(), None);
    }

    #[test]
    fn test_build_generator_for_each_version() {
        let configs = [
            GeneratorConfig::new(UuidVersion::V1, None, None, Some([1, 2, 3, 4, 5, 6])).unwrap(),
            GeneratorConfig::new(
                UuidVersion::V3,
                Some(CanonicalUuid::NAMESPACE_DNS),
                Some("python.org".into()),
                None,
            )
            .unwrap(),
            GeneratorConfig::new(UuidVersion::V4, None, None, None).unwrap(),
            GeneratorConfig::new(
                UuidVersion::V5,
                Some(CanonicalUuid::NAMESPACE_DNS),
                Some("python.org".into()),
                None,
            )
            .unwrap(),
            GeneratorConfig::new(UuidVersion::V7, None, None, None).unwrap(),
        ];

        for config in &configs {
            let generator = build_generator(config).unwrap();
            let uuid = generator.generate().unwrap();

            assert_eq!(generator.version(), config.version());
            assert_eq!(uuid.version(), Some(config.version()));
        }
    }

    #[test]
    fn test_build_generator_v1_uses_configured_node_id() {
        let config =
            GeneratorConfig::new(UuidVersion::V1, None, None, Some([1, 2, 3, 4, 5, 6])).unwrap();
        let created = build_generator(&config).unwrap().create().unwrap();

        assert!(created.ends_with("-010203040506"));
    }

    #[test]
    fn test_parse_node_id_forms() {
        let expected = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab];

        assert_eq!(parse_node_id("01:23:45:67:89:ab").unwrap(), expected);
        assert_eq!(parse_node_id("01-23-45-67-89-AB").unwrap(), expected);
        assert_eq!(parse_node_id("0123456789ab").unwrap(), expected);
    }

    #[test]
    fn test_parse_node_id_rejects_malformed() {
        assert!(parse_node_id("").is_err());
        assert!(parse_node_id("01:23:45:67:89").is_err());
        assert!(parse_node_id("01:23:45:67:89:ab:cd").is_err());
        assert!(parse_node_id("1:23:45:67:89:abc").is_err());
        assert!(parse_node_id("0123456789zz").is_err());
        assert!(parse_node_id("+1+2345678ab").is_err());
    }

    #[test]
    fn test_parse_node_id_rejects_mixed_separators() {
        let result = parse_node_id("01:23-45:67-89:ab");

        match result {
            Err(UuidError::InvalidInput(msg)) => assert!(msg.contains("01:23-45:67-89:ab")),
            _ => panic!("Expected InvalidInput error"),
        }
        assert!(parse_node_id("01-23-45-67-89:ab").is_err());
    }

    #[test]
    fn test_parse_namespace() {
        assert_eq!(parse_namespace("dns").unwrap(), CanonicalUuid::NAMESPACE_DNS);
        assert_eq!(parse_namespace("URL").unwrap(), CanonicalUuid::NAMESPACE_URL);
        assert_eq!(parse_namespace("oid").unwrap(), CanonicalUuid::NAMESPACE_OID);
        assert_eq!(parse_namespace("x500").unwrap(), CanonicalUuid::NAMESPACE_X500);
        assert_eq!(
            parse_namespace("550e8400-e29b-41d4-a716-446655440000")
                .unwrap()
                .to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
        assert!(parse_namespace("example").is_err());
    }
}
