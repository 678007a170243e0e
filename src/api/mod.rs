//! API collaborator abstraction
//!
//! The facade only needs "give me the JSON body for this endpoint and date
//! range". `SummarySource` is that seam; `HttpSource` is the real network
//! implementation, tests use in-memory sources.

mod endpoints;
mod http;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::consts::DATE_FORMAT;
use crate::convert::SummaryVariant;
use crate::error::{FrameError, Result};
use crate::utils::parse_date;

pub use http::HttpSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

impl ApiVersion {
    pub fn name(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(ApiVersion::V1),
            "v2" | "2" => Ok(ApiVersion::V2),
            other => Err(FrameError::Config(format!("unknown API version \"{other}\""))),
        }
    }

    /// Endpoint serving `kind` in this API version
    pub fn endpoint(self, kind: SummaryKind) -> Result<Endpoint> {
        let found = match self {
            ApiVersion::V1 => endpoints::v1(kind),
            ApiVersion::V2 => endpoints::v2(kind),
        };
        found.ok_or(FrameError::UnsupportedKind {
            kind: kind.name(),
            version: self.name(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryKind {
    Sleep,
    Activity,
    Readiness,
    /// Ideal bedtime report (v1 only)
    Bedtime,
    HeartRate,
    Sessions,
    Tags,
    Vo2Max,
    Workouts,
    CardiovascularAge,
    PersonalInfo,
}

impl SummaryKind {
    pub fn name(self) -> &'static str {
        match self {
            SummaryKind::Sleep => "sleep",
            SummaryKind::Activity => "activity",
            SummaryKind::Readiness => "readiness",
            SummaryKind::Bedtime => "bedtime",
            SummaryKind::HeartRate => "heart rate",
            SummaryKind::Sessions => "sessions",
            SummaryKind::Tags => "tags",
            SummaryKind::Vo2Max => "VO2 max",
            SummaryKind::Workouts => "workouts",
            SummaryKind::CardiovascularAge => "cardiovascular age",
            SummaryKind::PersonalInfo => "personal info",
        }
    }

    /// Converter variant applied when a fetch asks for conversion
    pub fn converter_variant(self) -> Option<SummaryVariant> {
        match self {
            SummaryKind::Sleep => Some(SummaryVariant::Sleep),
            SummaryKind::Activity => Some(SummaryVariant::Activity),
            _ => None,
        }
    }
}

/// Where the records sit in a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Array under a top-level field, e.g. `"sleep"` or `"data"`
    Field(&'static str),
    /// The body itself is the record
    Body,
}

/// How a date range is passed as query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeParams {
    Dates {
        start: &'static str,
        end: &'static str,
    },
    /// Full-day datetimes, for sample-level endpoints
    DateTimes {
        start: &'static str,
        end: &'static str,
    },
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub kind: SummaryKind,
    pub path: &'static str,
    pub payload: Payload,
    /// Column promoted to the table index; `None` for keyless payloads
    pub key_column: Option<&'static str>,
    pub range: RangeParams,
    /// Follows `next_token` pagination
    pub paginated: bool,
}

/// Optional inclusive date range of a fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end)
            && e < s
        {
            return Err(FrameError::InvalidDateRange {
                start: s.format(DATE_FORMAT).to_string(),
                end: e.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` or `YYYYMMDD` bounds
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let parse = |column: &str, raw: Option<&str>| -> Result<Option<NaiveDate>> {
            raw.map(|s| {
                parse_date(s.trim()).map_err(|_| FrameError::InvalidDate {
                    column: column.to_string(),
                    input: s.to_string(),
                })
            })
            .transpose()
        };
        Self::new(parse("start", start)?, parse("end", end)?)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Query parameters for `endpoint`, omitting unset bounds
    pub fn query_pairs(&self, endpoint: &Endpoint) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        match endpoint.range {
            RangeParams::Dates { start, end } => {
                if let Some(d) = self.start {
                    pairs.push((start, d.format(DATE_FORMAT).to_string()));
                }
                if let Some(d) = self.end {
                    pairs.push((end, d.format(DATE_FORMAT).to_string()));
                }
            }
            RangeParams::DateTimes { start, end } => {
                if let Some(d) = self.start {
                    pairs.push((start, format!("{}T00:00:00", d.format(DATE_FORMAT))));
                }
                if let Some(d) = self.end {
                    pairs.push((end, format!("{}T23:59:59", d.format(DATE_FORMAT))));
                }
            }
            RangeParams::None => {}
        }
        pairs
    }
}

/// Fetches raw response bodies from the summary API
pub trait SummarySource {
    fn fetch(&self, endpoint: &Endpoint, range: &DateRange) -> Result<serde_json::Value>;
}

impl<S: SummarySource + ?Sized> SummarySource for &S {
    fn fetch(&self, endpoint: &Endpoint, range: &DateRange) -> Result<serde_json::Value> {
        (**self).fetch(endpoint, range)
    }
}

impl<S: SummarySource + ?Sized> SummarySource for Box<S> {
    fn fetch(&self, endpoint: &Endpoint, range: &DateRange) -> Result<serde_json::Value> {
        (**self).fetch(endpoint, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, m, d).unwrap()
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = DateRange::new(Some(ymd(11, 2)), Some(ymd(11, 1))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2021-11-02 is after 2021-11-01"
        );
    }

    #[test]
    fn same_day_range_is_fine() {
        assert!(DateRange::new(Some(ymd(11, 1)), Some(ymd(11, 1))).is_ok());
    }

    #[test]
    fn parse_accepts_both_formats() {
        let range = DateRange::parse(Some("20211101"), Some("2021-11-07")).unwrap();
        assert_eq!(range.start(), Some(ymd(11, 1)));
        assert_eq!(range.end(), Some(ymd(11, 7)));
    }

    #[test]
    fn parse_rejects_bad_bound() {
        assert!(matches!(
            DateRange::parse(Some("last week"), None),
            Err(FrameError::InvalidDate { ref column, .. }) if column == "start"
        ));
    }

    #[test]
    fn v1_query_names() {
        let endpoint = ApiVersion::V1.endpoint(SummaryKind::Sleep).unwrap();
        let range = DateRange::new(Some(ymd(11, 1)), None).unwrap();
        assert_eq!(
            range.query_pairs(&endpoint),
            vec![("start", "2021-11-01".to_string())]
        );
    }

    #[test]
    fn v2_heart_rate_uses_datetimes() {
        let endpoint = ApiVersion::V2.endpoint(SummaryKind::HeartRate).unwrap();
        let range = DateRange::new(Some(ymd(11, 1)), Some(ymd(11, 2))).unwrap();
        assert_eq!(
            range.query_pairs(&endpoint),
            vec![
                ("start_datetime", "2021-11-01T00:00:00".to_string()),
                ("end_datetime", "2021-11-02T23:59:59".to_string()),
            ]
        );
    }

    #[test]
    fn personal_info_ignores_range() {
        let endpoint = ApiVersion::V2.endpoint(SummaryKind::PersonalInfo).unwrap();
        let range = DateRange::new(Some(ymd(11, 1)), None).unwrap();
        assert!(range.query_pairs(&endpoint).is_empty());
    }

    #[test]
    fn version_parse() {
        assert_eq!(ApiVersion::parse("V1").unwrap(), ApiVersion::V1);
        assert_eq!(ApiVersion::parse(" 2 ").unwrap(), ApiVersion::V2);
        assert!(ApiVersion::parse("v3").is_err());
    }

    #[test]
    fn unsupported_kind_per_version() {
        assert!(matches!(
            ApiVersion::V2.endpoint(SummaryKind::Bedtime),
            Err(FrameError::UnsupportedKind { kind: "bedtime", version: "v2" })
        ));
        assert!(ApiVersion::V1.endpoint(SummaryKind::Workouts).is_err());
    }
}
