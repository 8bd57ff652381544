//! Bit layouts for the version, variant and timestamp fields.
//!
//! Positions follow RFC 4122 numbering, where bit 0 is the most significant bit of the 128-bit
//! value. Inside this module values are plain `u128`s, so field offsets are expressed as shifts
//! from the least significant end.

use crate::{UuidError, UuidResult, UuidVersion};
use chrono::{DateTime, Utc};

/// Bits 48-51.
const VERSION_SHIFT: u32 = 76;
const VERSION_MASK: u128 = 0xF << VERSION_SHIFT;

/// Bits 64-65.
const VARIANT_SHIFT: u32 = 62;
const VARIANT_MASK: u128 = 0b11 << VARIANT_SHIFT;
const VARIANT_RFC: u128 = 0b10 << VARIANT_SHIFT;

/// Offset between 1582-10-15T00:00:00Z and the Unix epoch, in 100 ns ticks.
const GREGORIAN_OFFSET_TICKS: i128 = 0x01B2_1DD2_1381_4000;
const TICKS_PER_SECOND: i128 = 10_000_000;
const MAX_GREGORIAN_TICKS: i128 = (1 << 60) - 1;

const MAX_UNIX_MILLIS: i64 = (1 << 48) - 1;
const V7_RANDOM_MASK: u128 = (1 << 80) - 1;

/// Overwrites the version and variant fields of `raw`.
pub(crate) fn stamp(raw: u128, version: UuidVersion) -> u128 {
    (raw & !VERSION_MASK & !VARIANT_MASK)
        | (u128::from(version.nibble()) << VERSION_SHIFT)
        | VARIANT_RFC
}

pub(crate) fn version_bits(value: u128) -> u8 {
    ((value & VERSION_MASK) >> VERSION_SHIFT) as u8
}

pub(crate) fn is_rfc_variant(value: u128) -> bool {
    value & VARIANT_MASK == VARIANT_RFC
}

/// Packs a v7 value: 48-bit Unix milliseconds, then the low 80 bits of `random`.
pub(crate) fn pack_v7(at: DateTime<Utc>, random: u128) -> UuidResult<u128> {
    let millis = at.timestamp_millis();
    if !(0..=MAX_UNIX_MILLIS).contains(&millis) {
        return Err(UuidError::InvalidTimestamp(format!(
            "{} is outside the range of a 48-bit Unix millisecond timestamp",
            at
        )));
    }

    let raw = ((millis as u128) << 80) | (random & V7_RANDOM_MASK);
    Ok(stamp(raw, UuidVersion::V7))
}

pub(crate) fn unpack_v7(value: u128) -> Option<DateTime<Utc>> {
    let millis = (value >> 80) as i64;
    DateTime::from_timestamp_millis(millis)
}

/// Counts 100 ns ticks from the Gregorian epoch to `at`.
pub(crate) fn gregorian_ticks(at: DateTime<Utc>) -> UuidResult<u64> {
    let unix_ticks = i128::from(at.timestamp()) * TICKS_PER_SECOND
        + i128::from(at.timestamp_subsec_nanos() / 100);
    let ticks = unix_ticks + GREGORIAN_OFFSET_TICKS;
    if !(0..=MAX_GREGORIAN_TICKS).contains(&ticks) {
        return Err(UuidError::InvalidTimestamp(format!(
            "{} is outside the range of a 60-bit Gregorian timestamp",
            at
        )));
    }
    Ok(ticks as u64)
}

pub(crate) fn check_gregorian_ticks(ticks: u64) -> UuidResult<u64> {
    if i128::from(ticks) > MAX_GREGORIAN_TICKS {
        return Err(UuidError::InvalidTimestamp(
            "60-bit Gregorian timestamp exhausted".into(),
        ));
    }
    Ok(ticks)
}

/// Packs a v1 value from its 60-bit tick count, 14-bit clock sequence and 48-bit node id.
pub(crate) fn pack_v1(ticks: u64, clock_seq: u16, node_id: [u8; 6]) -> u128 {
    let ticks = u128::from(ticks);
    let time_low = ticks & 0xFFFF_FFFF;
    let time_mid = (ticks >> 32) & 0xFFFF;
    let time_hi = (ticks >> 48) & 0x0FFF;

    let mut node = [0u8; 16];
    node[10..].copy_from_slice(&node_id);

    let raw = (time_low << 96)
        | (time_mid << 80)
        | (time_hi << 64)
        | (u128::from(clock_seq & 0x3FFF) << 48)
        | u128::from_be_bytes(node);
    stamp(raw, UuidVersion::V1)
}

pub(crate) fn unpack_v1(value: u128) -> Option<DateTime<Utc>> {
    let time_low = (value >> 96) & 0xFFFF_FFFF;
    let time_mid = (value >> 80) & 0xFFFF;
    let time_hi = (value >> 64) & 0x0FFF;
    let ticks = ((time_hi << 48) | (time_mid << 32) | time_low) as i128;

    let unix_ticks = ticks - GREGORIAN_OFFSET_TICKS;
    let secs = i64::try_from(unix_ticks.div_euclid(TICKS_PER_SECOND)).ok()?;
    let nanos = (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
}
