//! Stateless scalar normalizers.
//!
//! None of these fail: a value is passed through, rounded, or left absent.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SubsecRound, TimeZone, Utc};

use crate::precision::{Precision, CANONICAL_TIMEZONE};

/// Every f64 at or above this magnitude is already an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

pub fn round_length(value: Option<f64>, precision: &Precision) -> Option<f64> {
    value.map(|v| round_to_digits(v, precision.length_digits()))
}

pub fn round_angle(value: Option<f64>, precision: &Precision) -> Option<f64> {
    value.map(|v| round_to_digits(v, precision.angle_digits()))
}

/// Rounds to `digits` decimal places.
///
/// The exact binary value is rounded in decimal, ties to even, and the
/// result read back as the nearest f64. Rounding the output again returns
/// it unchanged at every magnitude.
pub fn round_to_digits(value: f64, digits: i32) -> f64 {
    if !value.is_finite() || value.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    if digits < 0 {
        let scale = 10f64.powi(-digits);
        return (value / scale).round_ties_even() * scale;
    }
    format!("{:.*}", digits as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Label coercion: the calendar fields of `timestamp` are read off as they
/// stand and relabelled as UTC. The offset is discarded, not applied.
/// Resolution is truncated to microseconds.
pub fn to_canonical_utc<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> DateTime<Utc> {
    naive_to_canonical_utc(&timestamp.naive_local())
}

pub fn naive_to_canonical_utc(timestamp: &NaiveDateTime) -> DateTime<Utc> {
    CANONICAL_TIMEZONE
        .from_utc_datetime(timestamp)
        .trunc_subsecs(6)
}

/// The same instant in the canonical zone, truncated to microseconds.
pub fn to_instant_utc<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> DateTime<Utc> {
    timestamp.with_timezone(&CANONICAL_TIMEZONE).trunc_subsecs(6)
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepts RFC 3339 (`T` or space separated) and offset-less ISO 8601 text.
/// An offset-less timestamp is read as UTC wall-clock time.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(ts);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}
