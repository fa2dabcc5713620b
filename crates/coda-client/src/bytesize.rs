//! Human-readable byte-size codec.
//!
//! The device reports memory, storage and throughput quantities as strings
//! like `"512B"`, `"3.4G"` or `"120 Bytes"`. [`parse`] turns those into raw
//! byte counts and [`format`] renders counts back. Units are powers of 1024.
//!
//! [`parse`] is a total function: malformed input never errors, it degrades
//! to zero or to the best-effort numeric interpretation. The round trip is
//! lossy by design since [`format`] truncates to one decimal digit.

use serde::{Deserialize, Deserializer};

use crate::coerce;

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;
const TIB: u64 = 1 << 40;
const PIB: u64 = 1 << 50;
const EIB: u64 = 1 << 60;

/// Parse a device-reported size string into a byte count.
///
/// Accepts plain integers, an optional `" Bytes"` suffix, and a single-letter
/// unit suffix in `B`/`K`/`M`/`G`/`T`/`P`/`E`. A string with an unrecognized
/// trailing character is interpreted as a bare number; anything unparsable
/// yields 0.
pub fn parse(s: &str) -> i64 {
    if let Ok(i) = s.trim().parse::<i64>() {
        return i;
    }

    let s = s.strip_suffix(" Bytes").unwrap_or(s);
    if s.len() <= 1 {
        return coerce::parse_i64(s);
    }

    let mut chars = s.chars();
    let unit = chars.next_back().unwrap_or_default();
    let prefix = chars.as_str();

    let factor = match unit {
        'B' => 1,
        'K' => KIB,
        'M' => MIB,
        'G' => GIB,
        'T' => TIB,
        'P' => PIB,
        'E' => EIB,
        _ => return coerce::parse_f64(s) as i64,
    };

    (coerce::parse_f64(prefix) * factor as f64) as i64
}

/// Render a byte count as a human-readable size string.
///
/// Picks the largest unit where the value is at least 1 and formats to one
/// decimal digit, with a trailing `.0` suppressed: `format(1536)` is
/// `"1.5K"`, `format(1024)` is `"1K"`, `format(500)` is `"500B"`.
pub fn format(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = "B";

    for (suffix, factor) in [
        ("E", EIB),
        ("P", PIB),
        ("T", TIB),
        ("G", GIB),
        ("M", MIB),
        ("K", KIB),
    ] {
        if bytes >= factor {
            unit = suffix;
            value /= factor as f64;
            break;
        }
    }

    let mut rendered = std::format!("{value:.1}");
    if rendered.ends_with(".0") {
        rendered.truncate(rendered.len() - 2);
    }

    rendered + unit
}

/// serde helper for record fields holding formatted sizes.
///
/// Use as `#[serde(deserialize_with = "crate::bytesize::deserialize")]`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse(&s))
}
