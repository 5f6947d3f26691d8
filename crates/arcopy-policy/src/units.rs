//! Magnitude + unit parsing for age and size fields.
//!
//! Raw values arrive as decimal-digit strings from the console; every helper
//! trims, parses, bounds-checks, and tags failures with the submitting field.

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};
use crate::model::{AgeUnit, Choice, FieldId, SizeUnit};

/// An age magnitude with its selected unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeThreshold {
    /// Magnitude in `unit` steps.
    pub value: i64,
    /// Unit the magnitude is expressed in.
    pub unit: AgeUnit,
}

/// A byte-quantity magnitude with its selected unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeThreshold {
    /// Magnitude in `unit` steps.
    pub value: u64,
    /// Unit the magnitude is expressed in.
    pub unit: SizeUnit,
}

impl SizeThreshold {
    /// Exact byte count represented by this threshold.
    #[must_use]
    pub fn canonical_bytes(self) -> u128 {
        u128::from(self.value) * self.unit.bytes_multiplier()
    }
}

/// Whether `max` is at least `min` when both are expanded to bytes.
#[must_use]
pub fn max_at_least_min(min: SizeThreshold, max: SizeThreshold) -> bool {
    max.canonical_bytes() >= min.canonical_bytes()
}

/// Parse a magnitude + unit pair into its canonical form.
///
/// The magnitude must be a non-negative integer and the unit must be
/// selected; the pair is returned exactly as parsed.
///
/// # Errors
///
/// `Parse` tagged to `value_field` for malformed magnitudes,
/// `MissingSelection` tagged to `unit_field` for an unselected unit.
pub fn to_canonical<U: Copy>(
    value_field: FieldId,
    raw_value: &str,
    unit_field: FieldId,
    unit: Choice<U>,
) -> PolicyResult<(i64, U)> {
    let value = parse_non_negative_i64(value_field, raw_value)?;
    let Choice::Selected(unit) = unit else {
        return Err(PolicyError::missing(unit_field));
    };
    Ok((value, unit))
}

pub(crate) fn parse_non_negative_i64(field: FieldId, raw: &str) -> PolicyResult<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .filter(|value| *value >= 0)
        .ok_or_else(|| PolicyError::parse(field, trimmed, "must be a non-negative integer"))
}

pub(crate) fn parse_non_negative_u32(field: FieldId, raw: &str) -> PolicyResult<u32> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| PolicyError::parse(field, trimmed, "must be a non-negative integer"))
}

pub(crate) fn parse_non_negative_u64(field: FieldId, raw: &str) -> PolicyResult<u64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| PolicyError::parse(field, trimmed, "must be a non-negative integer"))
}

/// Start ages are stored in a 32-bit slot on the backend.
pub(crate) fn parse_start_age(field: FieldId, raw: &str) -> PolicyResult<i64> {
    let value = parse_non_negative_i64(field, raw)?;
    if value > i64::from(i32::MAX) {
        return Err(PolicyError::parse(
            field,
            raw.trim(),
            "must fit within 32-bit signed integer range",
        ));
    }
    Ok(value)
}

pub(crate) fn parse_percentage(field: FieldId, raw: &str) -> PolicyResult<u8> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u8>()
        .ok()
        .filter(|value| *value <= 100)
        .ok_or_else(|| PolicyError::parse(field, trimmed, "must be between 0 and 100"))
}
