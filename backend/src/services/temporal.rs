//! Date normalization and time-window slicing of series data.
//!
//! Series are assumed to arrive in chronological order from the producer.
//! Windowing only slices or filters; it never re-sorts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::models::{CanonicalDate, WindowSpec};

/// Default key holding the date of a series record.
pub const DEFAULT_DATE_KEY: &str = "date";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const NAMED_MONTH_FORMATS: &[&str] = &[
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Parse a date string in any supported encoding, truncated to the day.
///
/// The calendar date is taken as written: a timestamp carrying an offset
/// keeps its local date rather than being converted to UTC.
pub fn parse_date_str(raw: &str) -> Option<CanonicalDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if starts_with_year(s) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive().into());
        }
        for fmt in OFFSET_DATETIME_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Some(dt.date_naive().into());
            }
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt.date().into());
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(date.into());
            }
        }
        return None;
    }

    for fmt in NAMED_MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.into());
        }
    }

    parse_numeric_day_month(s)
}

/// chrono's `%Y` accepts short years; year-first encodings must spell all four digits.
fn starts_with_year(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 5 && bytes[..4].iter().all(u8::is_ascii_digit) && !bytes[4].is_ascii_digit()
}

/// `MM/DD/YYYY`, or `DD/MM/YYYY` when the first component cannot be a month.
///
/// Separators `/`, `-` and `.` are accepted; a trailing time is ignored.
fn parse_numeric_day_month(s: &str) -> Option<CanonicalDate> {
    let date_part = s.split_whitespace().next()?;
    let parts: Vec<&str> = date_part.split(|c: char| c == '/' || c == '-' || c == '.').collect();
    if parts.len() != 3 || parts[2].len() != 4 {
        return None;
    }
    if !parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    let (month, day) = if first > 12 { (second, first) } else { (first, second) };
    CanonicalDate::from_ymd(year, month, day)
}

/// Normalize a raw JSON date. `None` marks an invalid date.
///
/// Strings go through [`parse_date_str`]; numbers are Unix epoch
/// milliseconds.
pub fn normalize_date(raw: &Value) -> Option<CanonicalDate> {
    match raw {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => {
                    let f = n.as_f64()?;
                    if !f.is_finite() {
                        return None;
                    }
                    f.trunc() as i64
                }
            };
            DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive().into())
        }
        _ => None,
    }
}

/// Result of windowing a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Windowed {
    pub records: Vec<Value>,
    /// Records dropped because their date could not be placed on the axis
    pub dropped_invalid: usize,
}

/// Apply `spec` to `series`, reading record dates from `date_key`.
pub fn filter_window(series: &[Value], spec: &WindowSpec, date_key: &str) -> Windowed {
    match spec {
        WindowSpec::FixedDays { days } => {
            let from = series.len().saturating_sub(*days);
            Windowed {
                records: series[from..].to_vec(),
                dropped_invalid: 0,
            }
        }
        WindowSpec::All | WindowSpec::Custom { start: None, end: None } => Windowed {
            records: series.to_vec(),
            dropped_invalid: 0,
        },
        WindowSpec::Custom { start, end } => {
            let mut records = Vec::new();
            let mut dropped_invalid = 0;
            for record in series {
                match record.get(date_key).and_then(normalize_date) {
                    Some(date) => {
                        let after_start = start.map_or(true, |s| date >= s);
                        let before_end = end.map_or(true, |e| date <= e);
                        if after_start && before_end {
                            records.push(record.clone());
                        }
                    }
                    None => dropped_invalid += 1,
                }
            }
            Windowed {
                records,
                dropped_invalid,
            }
        }
    }
}

/// Apply `spec` to `series`; see [`filter_window`].
pub fn apply_window(series: &[Value], spec: &WindowSpec, date_key: &str) -> Vec<Value> {
    filter_window(series, spec, date_key).records
}

#[cfg(test)]
#[path = "temporal_tests.rs"]
mod tests;
