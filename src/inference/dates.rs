//! Date detection for string values

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Shape checks; calendar and clock validity is left to chrono
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<date>\d{4}-\d{2}-\d{2})[T ](?P<time>\d{2}:\d{2}:\d{2}(\.\d+)?)(?P<offset>Z|[+-](?P<oh>\d{2}):?(?P<om>\d{2}))?$",
    )
    .unwrap()
});

/// Check whether a string holds an ISO-8601 date or date-time
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM-DD[T ]HH:MM:SS[.fff][Z|±HH[:]MM]`.
pub fn is_date_string(value: &str) -> bool {
    let value = value.trim();
    if value.len() < 10 {
        return false;
    }

    if DATE_REGEX.is_match(value) {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    }

    let Some(caps) = DATETIME_REGEX.captures(value) else {
        return false;
    };

    if NaiveDate::parse_from_str(&caps["date"], "%Y-%m-%d").is_err() {
        return false;
    }
    if NaiveTime::parse_from_str(&caps["time"], "%H:%M:%S%.f").is_err() {
        return false;
    }

    match (caps.name("oh"), caps.name("om")) {
        (Some(h), Some(m)) => {
            let hours: u32 = h.as_str().parse().unwrap_or(99);
            let minutes: u32 = m.as_str().parse().unwrap_or(99);
            hours <= 23 && minutes <= 59
        }
        _ => true,
    }
}
