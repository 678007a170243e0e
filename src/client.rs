//! Client facade: fetch a summary, tabularize it, optionally convert it

use chrono::NaiveDate;

use crate::api::{ApiVersion, DateRange, Endpoint, HttpSource, Payload, SummaryKind, SummarySource};
use crate::config::Config;
use crate::convert::{Converter, SummaryVariant};
use crate::error::{FrameError, Result};
use crate::table::{Metrics, Record, Table, records_from_json, tabularize};
use crate::utils::{Timezone, debug_enabled, set_debug};

/// Column prefixes of the combined view
const SLEEP_PREFIX: &str = "SLEEP";
const READINESS_PREFIX: &str = "READY";
const ACTIVITY_PREFIX: &str = "ACTIVITY";

/// Options of a summary fetch
#[derive(Debug, Clone)]
pub struct SummaryQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub metrics: Option<Metrics>,
    /// Decode known columns for sleep and activity
    pub convert: bool,
    /// Columns to decode instead of the variant's defaults
    pub convert_cols: Option<Vec<String>>,
}

impl Default for SummaryQuery {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            metrics: None,
            convert: true,
            convert_cols: None,
        }
    }
}

impl SummaryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn metrics(mut self, metrics: impl Into<Metrics>) -> Self {
        self.metrics = Some(metrics.into());
        self
    }

    pub fn convert(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }

    pub fn convert_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.convert_cols = Some(cols.into_iter().map(Into::into).collect());
        self
    }
}

pub struct Client<S> {
    source: S,
    version: ApiVersion,
    timezone: Option<Timezone>,
}

impl Client<HttpSource> {
    /// HTTP client built from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.debug {
            set_debug(true);
        }
        let mut source = HttpSource::new(config.token()?);
        if let Some(url) = &config.base_url {
            source = source.with_base_url(url.clone());
        }
        if let Some(timeout) = config.timeout() {
            source = source.with_timeout(timeout);
        }
        let mut client = Client::new(source, config.version());
        if let Some(tz) = config.timezone()? {
            client = client.with_timezone(tz);
        }
        Ok(client)
    }
}

/// Pull the record list out of a response body
fn extract_records(endpoint: &Endpoint, body: serde_json::Value) -> Result<Vec<Record>> {
    match endpoint.payload {
        Payload::Body => records_from_json(body),
        Payload::Field(field) => {
            let missing = || FrameError::MissingField {
                field: field.to_string(),
            };
            let serde_json::Value::Object(mut map) = body else {
                return Err(missing());
            };
            records_from_json(map.remove(field).ok_or_else(missing)?)
        }
    }
}

impl<S: SummarySource> Client<S> {
    pub fn new(source: S, version: ApiVersion) -> Self {
        Self {
            source,
            version,
            timezone: None,
        }
    }

    /// Shift decoded timestamps into `timezone`
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = Some(timezone);
        self
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn converter(&self, variant: SummaryVariant, convert_cols: Option<Vec<String>>) -> Converter {
        let converter = Converter::new(variant, convert_cols);
        match self.timezone {
            Some(tz) => converter.with_timezone(tz),
            None => converter,
        }
    }

    /// Fetch one summary kind as a table.
    ///
    /// Transport and decoding errors from the source propagate unchanged.
    pub fn fetch(&self, kind: SummaryKind, query: &SummaryQuery) -> Result<Table> {
        let endpoint = self.version.endpoint(kind)?;
        let range = DateRange::new(query.start, query.end)?;
        let body = self.source.fetch(&endpoint, &range)?;
        let records = extract_records(&endpoint, body)?;
        if debug_enabled() {
            eprintln!("[DEBUG] {} {}: {} records", self.version.name(), kind.name(), records.len());
        }

        let Some(key) = endpoint.key_column else {
            return Ok(Table::unindexed(&records));
        };
        let mut table = tabularize(&records, query.metrics.as_ref(), key)?;
        if query.convert
            && let Some(variant) = kind.converter_variant()
        {
            self.converter(variant, query.convert_cols.clone())
                .convert_metrics(&mut table)?;
        }
        Ok(table)
    }

    pub fn fetch_sleep(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::Sleep, query)
    }

    pub fn fetch_activity(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::Activity, query)
    }

    pub fn fetch_readiness(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::Readiness, query)
    }

    /// Ideal bedtime windows (v1 only)
    pub fn fetch_bedtime(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::Bedtime, query)
    }

    pub fn fetch_heart_rate(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::HeartRate, query)
    }

    pub fn fetch_sessions(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::Sessions, query)
    }

    pub fn fetch_tags(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::Tags, query)
    }

    pub fn fetch_vo2_max(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::Vo2Max, query)
    }

    pub fn fetch_workouts(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::Workouts, query)
    }

    pub fn fetch_cardiovascular_age(&self, query: &SummaryQuery) -> Result<Table> {
        self.fetch(SummaryKind::CardiovascularAge, query)
    }

    /// One-row, keyless profile table
    pub fn fetch_personal_info(&self) -> Result<Table> {
        self.fetch(SummaryKind::PersonalInfo, &SummaryQuery::default())
    }

    /// Sleep, readiness and activity side by side.
    ///
    /// Columns are prefixed `SLEEP:`, `READY:` and `ACTIVITY:` before an
    /// inner join on the date key, so only dates present in all three
    /// summaries survive.
    pub fn fetch_combined(&self, query: &SummaryQuery) -> Result<Table> {
        let mut sleep = self.fetch_sleep(query)?;
        sleep.prefix_columns(SLEEP_PREFIX);
        let mut readiness = self.fetch_readiness(query)?;
        readiness.prefix_columns(READINESS_PREFIX);
        let mut activity = self.fetch_activity(query)?;
        activity.prefix_columns(ACTIVITY_PREFIX);

        sleep.inner_join(&readiness)?.inner_join(&activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_defaults_to_converting() {
        let q = SummaryQuery::new();
        assert!(q.convert);
        assert!(q.metrics.is_none());
        assert!(q.convert_cols.is_none());
    }

    #[test]
    fn query_builder() {
        let start = NaiveDate::from_ymd_opt(2021, 11, 1).unwrap();
        let q = SummaryQuery::new()
            .start(start)
            .metrics(["score"])
            .convert(false)
            .convert_cols(["total"]);
        assert_eq!(q.start, Some(start));
        assert_eq!(q.metrics, Some(Metrics::from("score")));
        assert!(!q.convert);
        assert_eq!(q.convert_cols, Some(vec!["total".to_string()]));
    }

    #[test]
    fn extract_field_payload() {
        let endpoint = ApiVersion::V1.endpoint(SummaryKind::Sleep).unwrap();
        let records = extract_records(&endpoint, json!({"sleep": [{"summary_date": "2020-10-31"}]})).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn extract_missing_field() {
        let endpoint = ApiVersion::V2.endpoint(SummaryKind::Sleep).unwrap();
        assert!(matches!(
            extract_records(&endpoint, json!({"sleep": []})),
            Err(FrameError::MissingField { ref field }) if field == "data"
        ));
        assert!(extract_records(&endpoint, json!([1])).is_err());
    }

    #[test]
    fn extract_body_payload() {
        let endpoint = ApiVersion::V2.endpoint(SummaryKind::PersonalInfo).unwrap();
        let records = extract_records(&endpoint, json!({"age": 31, "email": "a@b.c"})).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn from_config_requires_token() {
        let config = Config::default();
        assert!(matches!(
            Client::from_config(&config),
            Err(FrameError::Config(_))
        ));
    }

    #[test]
    fn from_config_applies_settings() {
        let config = Config::from_toml_str(
            r#"
            personal_access_token = "abc"
            api_version = "v1"
            base_url = "http://localhost:9000"
            timezone = "UTC"
            "#,
        )
        .unwrap();
        let client = Client::from_config(&config).unwrap();
        assert_eq!(client.version(), ApiVersion::V1);
        assert_eq!(client.source().base_url(), "http://localhost:9000");
        assert_eq!(client.timezone, Some(Timezone::Named(chrono_tz::UTC)));
    }
}
