//! UUID generation.
//!
//! This crate produces RFC 4122 / RFC 9562 identifiers behind a single contract:
//! [`UuidGenerator::create`], which returns the canonical textual form of a freshly generated
//! UUID.
//!
//! ## Canonical UUID form
//! - Length: 36
//! - Groups: 8-4-4-4-12 lowercase hexadecimal characters separated by hyphens
//! - Example: `550e8400-e29b-41d4-a716-446655440000`
//!
//! No braces, whitespace or `urn:` prefix are ever part of the canonical form. Use
//! [`CanonicalUuid::parse`] to validate an externally supplied identifier.
//!
//! ## Generators
//! One implementer per algorithm version:
//! - [`GregorianTimeGenerator`]: version 1, 100 ns ticks since 1582-10-15 plus a node id.
//! - [`NameBasedGenerator`]: versions 3 (MD5) and 5 (SHA-1), deterministic.
//! - [`RandomGenerator`]: version 4, 122 random bits.
//! - [`TimeOrderedGenerator`]: version 7, Unix milliseconds followed by random bits. Values
//!   sort by creation time.
//!
//! There is no default version. Pick an implementer directly, or describe the choice with a
//! [`GeneratorConfig`] and call [`build_generator`].
//!
//! ## Failure
//! The only runtime failure is [`UuidError::EntropyUnavailable`]. It is returned to the caller
//! as-is; generators never fall back to a weaker random source.

mod canonical;
mod clock;
mod config;
mod entropy;
mod generator;
mod layout;
mod version;

// Re-export public types
pub use canonical::{CanonicalUuid, Uuid};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{build_generator, parse_namespace, parse_node_id, GeneratorConfig};
pub use entropy::{OsRandom, RandomSource};
pub use generator::{
    GregorianTimeGenerator, NameBasedGenerator, RandomGenerator, TimeOrderedGenerator,
    UuidGenerator,
};
pub use version::UuidVersion;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// The secure random source could not produce bytes. Not recoverable.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(#[from] rand::Error),
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The clock reported an instant that the requested layout cannot encode.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
