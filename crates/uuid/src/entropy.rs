//! Secure random sourcing.

use crate::UuidResult;
use rand::{rngs::OsRng, RngCore};

/// A provider of unpredictable bytes suitable for cryptographic use.
///
/// Implementations must be safe to share between threads. A failure to produce bytes is
/// reported as [`UuidError::EntropyUnavailable`](crate::UuidError::EntropyUnavailable) and must
/// never be papered over with a weaker generator.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fills `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> UuidResult<()>;
}

/// The operating system's secure random number generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> UuidResult<()> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            tracing::error!("secure random source failed: {}", e);
            e.into()
        })
    }
}

pub(crate) fn random_u128<R: RandomSource + ?Sized>(source: &R) -> UuidResult<u128> {
    let mut bytes = [0u8; 16];
    source.fill(&mut bytes)?;
    Ok(u128::from_be_bytes(bytes))
}

pub(crate) fn random_u16<R: RandomSource + ?Sized>(source: &R) -> UuidResult<u16> {
    let mut bytes = [0u8; 2];
    source.fill(&mut bytes)?;
    Ok(u16::from_be_bytes(bytes))
}
