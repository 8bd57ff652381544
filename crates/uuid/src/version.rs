use crate::UuidError;
use std::{fmt, str::FromStr};

/// The generation algorithms this crate implements, keyed by the RFC version nibble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UuidVersion {
    /// Gregorian time and node id.
    V1,
    /// MD5 name-based.
    V3,
    /// Random.
    V4,
    /// SHA-1 name-based.
    V5,
    /// Unix-epoch time-ordered.
    V7,
}

impl UuidVersion {
    /// The 4-bit value stored in bits 48-51 of a UUID of this version.
    pub const fn nibble(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
            Self::V7 => 7,
        }
    }

    /// Maps a version nibble back to a supported version.
    pub const fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            1 => Some(Self::V1),
            3 => Some(Self::V3),
            4 => Some(Self::V4),
            5 => Some(Self::V5),
            7 => Some(Self::V7),
            _ => None,
        }
    }

    /// Whether values of this version are derived from a namespace and a name.
    pub fn is_name_based(self) -> bool {
        matches!(self, Self::V3 | Self::V5)
    }

    /// Whether values of this version embed a creation timestamp.
    pub fn is_time_based(self) -> bool {
        matches!(self, Self::V1 | Self::V7)
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.nibble())
    }
}

impl FromStr for UuidVersion {
    type Err = UuidError;

    /// Accepts `7`, `v7` or `V7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('v')
            .or_else(|| s.strip_prefix('V'))
            .unwrap_or(s);

        digits
            .parse::<u8>()
            .ok()
            .and_then(UuidVersion::from_nibble)
            .ok_or_else(|| {
                UuidError::InvalidInput(format!(
                    "unsupported UUID version '{}', expected one of 1, 3, 4, 5, 7",
                    s
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_round_trip() {
        for version in [
            UuidVersion::V1,
            UuidVersion::V3,
            UuidVersion::V4,
            UuidVersion::V5,
            UuidVersion::V7,
        ] {
            assert_eq!(UuidVersion::from_nibble(version.nibble()), Some(version));
        }
    }

    #[test]
    fn test_from_nibble_rejects_unsupported() {
        assert_eq!(UuidVersion::from_nibble(0), None);
        assert_eq!(UuidVersion::from_nibble(2), None);
        assert_eq!(UuidVersion::from_nibble(6), None);
        assert_eq!(UuidVersion::from_nibble(8), None);
    }

    #[test]
    fn test_from_str_accepts_prefixed_and_bare() {
        assert_eq!("4".parse::<UuidVersion>().unwrap(), UuidVersion::V4);
        assert_eq!("v7".parse::<UuidVersion>().unwrap(), UuidVersion::V7);
        assert_eq!("V1".parse::<UuidVersion>().unwrap(), UuidVersion::V1);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let result = "v2".parse::<UuidVersion>();

        match result {
            Err(UuidError::InvalidInput(msg)) => assert!(msg.contains("unsupported UUID version")),
            _ => panic!("Expected InvalidInput error"),
        }
        assert!("".parse::<UuidVersion>().is_err());
        assert!("vv4".parse::<UuidVersion>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(UuidVersion::V5.to_string(), "v5");
    }

    #[test]
    fn test_classification() {
        assert!(UuidVersion::V3.is_name_based());
        assert!(UuidVersion::V5.is_name_based());
        assert!(!UuidVersion::V4.is_name_based());
        assert!(UuidVersion::V1.is_time_based());
        assert!(UuidVersion::V7.is_time_based());
        assert!(!UuidVersion::V4.is_time_based());
    }
}
