use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::consts::DATE_FORMAT;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Try YYYYMMDD
    if s.len() == 8 {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Ok(d);
        }
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(d);
    }
    Err(format!(
        "Invalid date \"{}\" (expected YYYYMMDD or YYYY-MM-DD)",
        s
    ))
}

/// Parse a key-column value into the calendar date it reports on.
///
/// Timestamps keep the date of their own offset, so a record stamped
/// `2021-11-01T04:00:00-07:00` belongs to 2021-11-01 regardless of where
/// the caller runs.
pub(crate) fn parse_key_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if let Ok(d) = parse_date(trimmed) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.date())
}
