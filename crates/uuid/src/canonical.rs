//! The canonical UUID value type.

use crate::{layout, UuidError, UuidResult, UuidVersion};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Positions of the four hyphens in the canonical form (0-based).
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];
const CANONICAL_LEN: usize = 36;

/// A UUID whose textual form is always the canonical 8-4-4-4-12 lowercase hyphenated one.
///
/// This wrapper type guarantees that once constructed, rendering the value yields exactly
/// 36 characters with hyphens at fixed offsets and no surrounding braces or whitespace.
///
/// # Construction
/// - A [`UuidGenerator`](crate::UuidGenerator) produces new values.
/// - [`CanonicalUuid::parse`] validates an externally supplied identifier.
/// - [`CanonicalUuid::from_u128`] / [`CanonicalUuid::from_bytes`] wrap raw bits.
///
/// # Ordering
/// `Ord` compares the big-endian bytes, which is the same order as comparing the canonical
/// strings. For version 7 values this is creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalUuid(Uuid);

impl CanonicalUuid {
    /// Name space for fully qualified domain names.
    pub const NAMESPACE_DNS: CanonicalUuid = CanonicalUuid(Uuid::NAMESPACE_DNS);
    /// Name space for URLs.
    pub const NAMESPACE_URL: CanonicalUuid = CanonicalUuid(Uuid::NAMESPACE_URL);
    /// Name space for ISO object identifiers.
    pub const NAMESPACE_OID: CanonicalUuid = CanonicalUuid(Uuid::NAMESPACE_OID);
    /// Name space for X.500 distinguished names.
    pub const NAMESPACE_X500: CanonicalUuid = CanonicalUuid(Uuid::NAMESPACE_X500);

    /// Validates and parses a UUID string that must already be in canonical form.
    ///
    /// This does **not** normalise other common UUID forms (uppercase, braced, simple, URN).
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 36 lowercase hex characters in 8-4-4-4-12 groups, got: '{}'",
                input
            )));
        }

        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("invalid UUID '{}': {}", input, e)))
    }

    /// Returns true if `input` is in canonical form.
    ///
    /// This is a purely syntactic check:
    /// - Exactly 36 bytes long
    /// - `-` at offsets 8, 13, 18 and 23
    /// - Lowercase hex characters (`0-9` and `a-f`) everywhere else
    pub fn is_canonical(input: &str) -> bool {
        input.len() == CANONICAL_LEN
            && input.bytes().enumerate().all(|(i, b)| {
                if HYPHEN_POSITIONS.contains(&i) {
                    b == b'-'
                } else {
                    matches!(b, b'0'..=b'9' | b'a'..=b'f')
                }
            })
    }

    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub const fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Returns the underlying `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// The raw value of bits 48-51.
    pub fn version_bits(&self) -> u8 {
        layout::version_bits(self.as_u128())
    }

    /// The generation algorithm, if the variant is RFC 4122 and the version is one this crate
    /// implements.
    pub fn version(&self) -> Option<UuidVersion> {
        if !self.is_rfc_variant() {
            return None;
        }
        UuidVersion::from_nibble(self.version_bits())
    }

    /// Whether bits 64-65 are `10`.
    pub fn is_rfc_variant(&self) -> bool {
        layout::is_rfc_variant(self.as_u128())
    }

    /// The embedded creation time of a version 1 or version 7 value.
    ///
    /// Version 1 times are exact to 100 ns, version 7 times to 1 ms. Other versions carry no
    /// time and return `None`.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self.version()? {
            UuidVersion::V1 => layout::unpack_v1(self.as_u128()),
            UuidVersion::V7 => layout::unpack_v7(self.as_u128()),
            _ => None,
        }
    }

    /// 32 lowercase hex characters, no hyphens.
    pub fn simple(&self) -> String {
        self.0.simple().to_string()
    }

    /// `urn:uuid:` followed by the canonical form.
    pub fn urn(&self) -> String {
        self.0.urn().to_string()
    }

    /// The canonical form wrapped in `{}`.
    pub fn braced(&self) -> String {
        self.0.braced().to_string()
    }
}

impl fmt::Display for CanonicalUuid {
    /// Formats the UUID in canonical form (lowercase, hyphenated, zero-padded groups).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for CanonicalUuid {
    type Err = UuidError;

    /// Equivalent to [`CanonicalUuid::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalUuid::parse(s)
    }
}

impl From<CanonicalUuid> for Uuid {
    fn from(value: CanonicalUuid) -> Self {
        value.0
    }
}

impl From<Uuid> for CanonicalUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CanonicalUuid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CanonicalUuid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CanonicalUuid::parse(&s).map_err(serde::de::Error::custom)
    }
}
