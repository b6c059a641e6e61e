//! Raw value coercion.
//!
//! Each coercer turns the first raw value of a query parameter into the
//! slot's target type. Blank values never reach a coercer: they mean "not
//! supplied" and leave the slot unset.

use chrono::{DateTime, FixedOffset};
use hippocrates_router::SlotRole;

use crate::ExtractionError;

/// Coerces a count-limit value to a non-negative integer.
///
/// `0` is a valid count.
///
/// # Errors
///
/// Returns a client error naming `field` and `raw` if the value is not a
/// non-negative integer that fits in `u32`.
pub fn coerce_count(field: &str, raw: &str) -> Result<u32, ExtractionError> {
    raw.parse::<u32>().map_err(|e| {
        ExtractionError::invalid_value(
            SlotRole::Count,
            field,
            raw,
            format!("expected a non-negative integer, {e}"),
        )
    })
}

/// Coerces a since-timestamp value to an instant.
///
/// Instants use the RFC 3339 date-time format with a mandatory offset, e.g.
/// `2014-01-01T00:00:00Z` or `2014-01-01T00:00:00.000+01:00`.
///
/// # Errors
///
/// Returns a client error naming `field` and `raw` if the value is not a
/// valid instant.
pub fn coerce_since(field: &str, raw: &str) -> Result<DateTime<FixedOffset>, ExtractionError> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| {
        ExtractionError::invalid_value(
            SlotRole::Since,
            field,
            raw,
            format!("expected an RFC 3339 instant, {e}"),
        )
    })
}
