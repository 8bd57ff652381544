//! The generation contract and one implementer per algorithm version.

use crate::clock::{Clock, SystemClock};
use crate::entropy::{random_u128, random_u16, OsRandom, RandomSource};
use crate::{layout, CanonicalUuid, Uuid, UuidError, UuidResult, UuidVersion};
use std::sync::atomic::{AtomicU64, Ordering};

/// Produces UUIDs of one version.
///
/// [`create`](UuidGenerator::create) takes no input and returns the canonical textual form.
/// The only failure under normal operation is
/// [`UuidError::EntropyUnavailable`]; callers should treat it as fatal.
///
/// Random and time-based implementers return a distinct value on every call. Name-based
/// implementers ([`NameBasedGenerator`]) are deterministic and return the same value every time.
pub trait UuidGenerator: Send + Sync {
    /// The version every value from this generator carries.
    fn version(&self) -> UuidVersion;

    /// Generates the next value.
    fn generate(&self) -> UuidResult<CanonicalUuid>;

    /// Generates the next value as a canonical 8-4-4-4-12 string.
    fn create(&self) -> UuidResult<String> {
        self.generate().map(|uuid| uuid.to_string())
    }
}

/// Version 4: 122 random bits.
#[derive(Clone, Debug, Default)]
pub struct RandomGenerator<R = OsRandom> {
    source: R,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::with_source(OsRandom)
    }
}

impl<R: RandomSource> RandomGenerator<R> {
    pub fn with_source(source: R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource> UuidGenerator for RandomGenerator<R> {
    fn version(&self) -> UuidVersion {
        UuidVersion::V4
    }

    fn generate(&self) -> UuidResult<CanonicalUuid> {
        let raw = random_u128(&self.source)?;
        Ok(CanonicalUuid::from_u128(layout::stamp(raw, UuidVersion::V4)))
    }
}

/// Version 7: 48-bit Unix milliseconds followed by 74 random bits.
///
/// Values created at least one millisecond apart sort in creation order, both as
/// [`CanonicalUuid`]s and as strings. Values created within the same millisecond are ordered
/// arbitrarily; no state is carried between calls.
#[derive(Clone, Debug, Default)]
pub struct TimeOrderedGenerator<C = SystemClock, R = OsRandom> {
    clock: C,
    source: R,
}

impl TimeOrderedGenerator {
    pub fn new() -> Self {
        Self::with_parts(SystemClock, OsRandom)
    }
}

impl<C: Clock, R: RandomSource> TimeOrderedGenerator<C, R> {
    pub fn with_parts(clock: C, source: R) -> Self {
        Self { clock, source }
    }
}

impl<C: Clock, R: RandomSource> UuidGenerator for TimeOrderedGenerator<C, R> {
    fn version(&self) -> UuidVersion {
        UuidVersion::V7
    }

    fn generate(&self) -> UuidResult<CanonicalUuid> {
        let random = random_u128(&self.source)?;
        let raw = layout::pack_v7(self.clock.now(), random)?;
        Ok(CanonicalUuid::from_u128(raw))
    }
}

/// Version 1: 100 ns ticks since the Gregorian epoch, a clock sequence and a node id.
///
/// The 14-bit clock sequence is drawn fresh for every value. When no node id is supplied a
/// random one is drawn once at construction with the multicast bit set, so it can never collide
/// with a real IEEE 802 address.
///
/// Tick counts handed out by one generator strictly increase: a call landing in the same
/// 100 ns interval as the previous one (or after a clock step backwards) takes the previous
/// count plus one.
#[derive(Debug)]
pub struct GregorianTimeGenerator<C = SystemClock, R = OsRandom> {
    clock: C,
    source: R,
    node_id: [u8; 6],
    last_ticks: AtomicU64,
}

impl GregorianTimeGenerator {
    /// A generator with a random node id.
    pub fn new() -> UuidResult<Self> {
        Self::with_parts(SystemClock, OsRandom, None)
    }
}

impl<C: Clock, R: RandomSource> GregorianTimeGenerator<C, R> {
    pub fn with_parts(clock: C, source: R, node_id: Option<[u8; 6]>) -> UuidResult<Self> {
        let node_id = match node_id {
            Some(node_id) => node_id,
            None => {
                let mut node_id = [0u8; 6];
                source.fill(&mut node_id)?;
                node_id[0] |= 0x01;
                node_id
            }
        };

        Ok(Self {
            clock,
            source,
            node_id,
            last_ticks: AtomicU64::new(0),
        })
    }

    pub fn node_id(&self) -> [u8; 6] {
        self.node_id
    }

    fn next_ticks(&self) -> UuidResult<u64> {
        let now = layout::gregorian_ticks(self.clock.now())?;
        let advance = |last: u64| now.max(last.saturating_add(1));
        let previous = self
            .last_ticks
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(advance(last)))
            .unwrap_or_else(|last| last);

        layout::check_gregorian_ticks(advance(previous))
    }
}

impl<C: Clock, R: RandomSource> UuidGenerator for GregorianTimeGenerator<C, R> {
    fn version(&self) -> UuidVersion {
        UuidVersion::V1
    }

    fn generate(&self) -> UuidResult<CanonicalUuid> {
        let ticks = self.next_ticks()?;
        let clock_seq = random_u16(&self.source)?;
        Ok(CanonicalUuid::from_u128(layout::pack_v1(
            ticks,
            clock_seq,
            self.node_id,
        )))
    }
}

/// Versions 3 and 5: a hash of a namespace and a name.
///
/// The value is computed once at construction, so every call to
/// [`create`](UuidGenerator::create) returns the same identifier and can never fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameBasedGenerator {
    version: UuidVersion,
    value: CanonicalUuid,
}

impl NameBasedGenerator {
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] unless `version` is [`UuidVersion::V3`] or
    /// [`UuidVersion::V5`].
    pub fn new(
        version: UuidVersion,
        namespace: &CanonicalUuid,
        name: impl AsRef<[u8]>,
    ) -> UuidResult<Self> {
        let value = Self::derive(version, namespace, name)?;
        Ok(Self { version, value })
    }

    /// Computes the name-based UUID without building a generator.
    pub fn derive(
        version: UuidVersion,
        namespace: &CanonicalUuid,
        name: impl AsRef<[u8]>,
    ) -> UuidResult<CanonicalUuid> {
        let namespace = namespace.uuid();
        let uuid = match version {
            UuidVersion::V3 => Uuid::new_v3(&namespace, name.as_ref()),
            UuidVersion::V5 => Uuid::new_v5(&namespace, name.as_ref()),
            other => {
                return Err(UuidError::InvalidInput(format!(
                    "{} is not a name-based UUID version",
                    other
                )))
            }
        };
        Ok(uuid.into())
    }
}

impl UuidGenerator for NameBasedGenerator {
    fn version(&self) -> UuidVersion {
        self.version
    }

    fn generate(&self) -> UuidResult<CanonicalUuid> {
        Ok(self.value)
    }
}
