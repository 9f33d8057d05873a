use crate::error::{Error, Result};
use chrono::{DateTime, Local, SecondsFormat, TimeDelta};
use regex::Regex;
use std::sync::LazyLock;

static RELATIVE_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\d+[A-Za-z]$").unwrap());

static BARE_OFFSET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[A-Za-z]$").unwrap());

/// Convert a `<integer><unit>` duration shorthand into a whole number of hours.
///
/// Month and year are calendar approximations (30 and 365 days), not
/// calendar-aware. Sub-hour units truncate toward zero, so `"30m"` is 0 hours.
pub fn duration_to_hours(spec: &str) -> Result<i64> {
    let unit = spec
        .chars()
        .last()
        .ok_or_else(|| Error::InvalidDuration(spec.to_string()))?;
    if !unit.is_ascii_alphabetic() {
        return Err(Error::InvalidDuration(spec.to_string()));
    }

    let count: i64 = spec[..spec.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| Error::InvalidDuration(spec.to_string()))?;

    let hours_per_unit = match unit {
        's' => return Ok(count / 3600),
        'm' => return Ok(count / 60),
        'h' => return Ok(count),
        'd' => 24,
        'w' => 24 * 7,
        'M' => 24 * 30,
        'y' => 24 * 365,
        other => return Err(Error::InvalidUnit(other)),
    };
    count
        .checked_mul(hours_per_unit)
        .ok_or_else(|| Error::InvalidDuration(spec.to_string()))
}

/// Normalize a timestamp argument into the absolute form the backend expects.
///
/// A relative offset like `-10h` or `-2d` becomes `now - <hours>` rendered as
/// RFC3339 with nanosecond precision and the local UTC offset. Anything else
/// passes through unchanged, which makes this idempotent on absolutes.
pub fn normalize_date(input: &str) -> Result<String> {
    normalize_date_at(input, Local::now())
}

/// Normalize a lookback argument where a bare offset means "in the past":
/// `10d` and `-10d` normalize identically.
pub fn normalize_lookback(input: &str) -> Result<String> {
    if BARE_OFFSET.is_match(input) {
        normalize_date(&format!("-{}", input))
    } else {
        normalize_date(input)
    }
}

/// Deterministic variant of [`normalize_date`] with an injected "now".
pub fn normalize_date_at(input: &str, now: DateTime<Local>) -> Result<String> {
    if RELATIVE_OFFSET.is_match(input) {
        let hours = duration_to_hours(&input[1..])?;
        let instant = now - TimeDelta::hours(hours);
        Ok(instant.to_rfc3339_opts(SecondsFormat::Nanos, false))
    } else {
        Ok(input.to_string())
    }
}
