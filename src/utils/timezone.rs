use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, TimeZone};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::FrameError;

/// Zone that decoded timestamps are shifted into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub fn parse(value: Option<&str>) -> Result<Self, FrameError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| FrameError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub fn to_fixed_offset<T: TimeZone>(self, dt: DateTime<T>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = dt.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = dt.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn parse_none_returns_local() {
        assert!(matches!(Timezone::parse(None).unwrap(), Timezone::Local));
    }

    #[test]
    fn parse_local_string_returns_local() {
        assert!(matches!(
            Timezone::parse(Some("LOCAL")).unwrap(),
            Timezone::Local
        ));
        assert!(matches!(
            Timezone::parse(Some("  local  ")).unwrap(),
            Timezone::Local
        ));
    }

    #[test]
    fn parse_utc_variants() {
        for raw in ["utc", "UTC", "z", "Z"] {
            let tz = Timezone::parse(Some(raw)).unwrap();
            assert!(matches!(tz, Timezone::Named(chrono_tz::UTC)));
        }
    }

    #[test]
    fn parse_named_timezone() {
        let tz = Timezone::parse(Some("Europe/Helsinki")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::Europe::Helsinki)));
    }

    #[test]
    fn parse_invalid_timezone_returns_error() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn shifts_fixed_offset_instant() {
        let dt = DateTime::parse_from_rfc3339("2026-06-15T23:00:00+03:00").unwrap();
        let tz = Timezone::parse(Some("America/New_York")).unwrap();
        let shifted = tz.to_fixed_offset(dt);
        // EDT is UTC-4 in June
        assert_eq!(shifted.offset().local_minus_utc(), -4 * 3600);
        assert_eq!(shifted.format("%H:%M").to_string(), "16:00");
        assert_eq!(shifted.with_timezone(&Utc), dt.with_timezone(&Utc));
    }
}
