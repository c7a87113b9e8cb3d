//! Day key and label formats.

use crate::error::{DailyCheckError, Result};
use chrono::NaiveDate;
use daily_check_types::DayRecord;

/// Canonical key format, e.g. `2024-01-10`.
pub const DAY_FORMAT: &str = "%Y-%m-%d";
/// e.g. `Wednesday, January 10 2024`.
pub const DAY_FORMAT_READABLE: &str = "%A, %B %-d %Y";

pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

pub fn day_readable(date: NaiveDate) -> String {
    date.format(DAY_FORMAT_READABLE).to_string()
}

/// Parses a canonical `YYYY-MM-DD` day. chrono also accepts unpadded fields
/// and surrounding whitespace, so the result must format back to `value`.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    let invalid = |source| DailyCheckError::InvalidDate {
        value: value.to_string(),
        source,
    };
    let date = NaiveDate::parse_from_str(value, DAY_FORMAT).map_err(|e| invalid(Some(e)))?;
    if day_key(date) != value {
        return Err(invalid(None));
    }
    Ok(date)
}

/// Zero-valued record for a day nobody has rated yet.
pub fn blank_day(date: NaiveDate) -> DayRecord {
    DayRecord::blank(day_key(date), day_readable(date))
}
