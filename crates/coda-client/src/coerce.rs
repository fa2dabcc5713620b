//! Lenient numeric parsing for stringly-typed device telemetry.
//!
//! The device reports many numeric fields as strings and occasionally omits
//! or garbles them. These helpers are total functions with a documented
//! "unparsed means zero" convention, so record decoding degrades gracefully
//! instead of failing a whole response over one bad field.

use serde::{Deserialize, Deserializer};

/// Parse a base-10 integer, returning 0 on any failure.
pub fn parse_i64(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

/// Parse a base-10 float, returning 0.0 on any failure.
pub fn parse_f64(s: &str) -> f64 {
    s.trim().parse().unwrap_or(0.0)
}

/// serde helper for integer fields the device reports as strings.
pub fn deserialize_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_i64(&s))
}

/// serde helper for float fields the device reports as strings.
pub fn deserialize_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_f64(&s))
}
