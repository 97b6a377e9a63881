//! Prometheus duration literals (`5m`, `1h30m`, `2w`).

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use thiserror::Error;

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;
const MS_PER_WEEK: u64 = 7 * MS_PER_DAY;
const MS_PER_YEAR: u64 = 365 * MS_PER_DAY;

/// `(suffix, milliseconds, only when exact)`, largest first.
///
/// Years and weeks are used only when they divide the whole value; `90d`
/// reads better than `12w6d`.
const UNITS: [(&str, u64, bool); 7] = [
    ("y", MS_PER_YEAR, true),
    ("w", MS_PER_WEEK, true),
    ("d", MS_PER_DAY, false),
    ("h", MS_PER_HOUR, false),
    ("m", MS_PER_MINUTE, false),
    ("s", MS_PER_SECOND, false),
    ("ms", 1, false),
];

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(([0-9]+)y)?(([0-9]+)w)?(([0-9]+)d)?(([0-9]+)h)?(([0-9]+)m)?(([0-9]+)s)?(([0-9]+)ms)?$")
        .expect("duration pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration string")]
    Empty,
    #[error("not a valid duration string: {0:?}")]
    Invalid(String),
    #[error("duration out of range: {0:?}")]
    Overflow(String),
}

/// Formats a millisecond count as a duration literal.
///
/// ```
/// use promql_fmt::duration::format_duration;
///
/// assert_eq!(format_duration(0), "0s");
/// assert_eq!(format_duration(90_000), "1m30s");
/// assert_eq!(format_duration(604_800_000), "1w");
/// ```
pub fn format_duration(ms: u64) -> String {
    if ms == 0 {
        return "0s".to_string();
    }

    let mut rest = ms;
    let mut out = String::new();
    for (suffix, unit, exact) in UNITS {
        if exact && rest % unit != 0 {
            continue;
        }
        let count = rest / unit;
        if count > 0 {
            let _ = write!(out, "{count}{suffix}");
            rest -= count * unit;
        }
    }
    out
}

/// Parses a duration literal back into milliseconds.
///
/// Units must appear largest first and at most once each; a bare `0` is
/// accepted.
pub fn parse_duration(text: &str) -> Result<u64, DurationError> {
    match text {
        "" => return Err(DurationError::Empty),
        "0" => return Ok(0),
        _ => {}
    }

    let caps = DURATION_RE
        .captures(text)
        .ok_or_else(|| DurationError::Invalid(text.to_string()))?;

    let mut total: u64 = 0;
    for (i, (_, unit, _)) in UNITS.iter().enumerate() {
        let Some(digits) = caps.get(2 * i + 2) else {
            continue;
        };
        let overflow = || DurationError::Overflow(text.to_string());
        let count: u64 = digits.as_str().parse().map_err(|_| overflow())?;
        total = count
            .checked_mul(*unit)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(overflow)?;
    }
    Ok(total)
}
