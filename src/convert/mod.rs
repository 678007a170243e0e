//! Column decoding for sleep and activity summaries
//!
//! Each summary variant registers which columns hold timestamps, durations
//! in seconds, or hypnogram strings. A converter rewrites those columns in
//! place and leaves everything else alone.

mod hypnogram;

use chrono::{DateTime, TimeDelta};

use crate::error::{FrameError, Result};
use crate::table::{Table, Value};
use crate::utils::{Timezone, debug_enabled};

pub use hypnogram::{SleepStage, decode_hypnogram, format_hypnogram};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// RFC 3339 text to a timezone-aware instant
    Timestamp,
    /// Seconds to a duration
    Timespan,
    /// Stage code string to decoded stages
    Hypnogram,
}

impl ConversionKind {
    pub fn name(self) -> &'static str {
        match self {
            ConversionKind::Timestamp => "timestamp",
            ConversionKind::Timespan => "timespan",
            ConversionKind::Hypnogram => "hypnogram",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryVariant {
    Sleep,
    Activity,
}

// v1 and v2 field names side by side; absent columns are skipped
const SLEEP_RULES: &[(&str, ConversionKind)] = &[
    ("bedtime_start", ConversionKind::Timestamp),
    ("bedtime_end", ConversionKind::Timestamp),
    ("awake", ConversionKind::Timespan),
    ("deep", ConversionKind::Timespan),
    ("duration", ConversionKind::Timespan),
    ("light", ConversionKind::Timespan),
    ("onset_latency", ConversionKind::Timespan),
    ("rem", ConversionKind::Timespan),
    ("total", ConversionKind::Timespan),
    ("awake_time", ConversionKind::Timespan),
    ("deep_sleep_duration", ConversionKind::Timespan),
    ("light_sleep_duration", ConversionKind::Timespan),
    ("rem_sleep_duration", ConversionKind::Timespan),
    ("total_sleep_duration", ConversionKind::Timespan),
    ("time_in_bed", ConversionKind::Timespan),
    ("latency", ConversionKind::Timespan),
    ("hypnogram_5min", ConversionKind::Hypnogram),
    ("sleep_phase_5_min", ConversionKind::Hypnogram),
];

/// Largest millisecond count a float timespan may round to
const MAX_MILLIS: f64 = i64::MAX as f64;

const ACTIVITY_RULES: &[(&str, ConversionKind)] = &[
    ("day_start", ConversionKind::Timestamp),
    ("day_end", ConversionKind::Timestamp),
];

impl SummaryVariant {
    pub fn name(self) -> &'static str {
        match self {
            SummaryVariant::Sleep => "sleep",
            SummaryVariant::Activity => "activity",
        }
    }

    fn rules(self) -> &'static [(&'static str, ConversionKind)] {
        match self {
            SummaryVariant::Sleep => SLEEP_RULES,
            SummaryVariant::Activity => ACTIVITY_RULES,
        }
    }

    pub fn rule_for(self, column: &str) -> Option<ConversionKind> {
        self.rules()
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, kind)| *kind)
    }

    pub fn default_columns(self) -> Vec<String> {
        self.rules()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// Rewrites the registered columns of one summary variant
#[derive(Debug, Clone)]
pub struct Converter {
    variant: SummaryVariant,
    columns: Vec<String>,
    timezone: Option<Timezone>,
}

impl Converter {
    /// `convert_cols` of `None` converts every column the variant knows.
    pub fn new(variant: SummaryVariant, convert_cols: Option<Vec<String>>) -> Self {
        Self {
            variant,
            columns: convert_cols.unwrap_or_else(|| variant.default_columns()),
            timezone: None,
        }
    }

    /// Shift decoded timestamps into `timezone` instead of keeping the
    /// offset the API reported.
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = Some(timezone);
        self
    }

    pub fn variant(&self) -> SummaryVariant {
        self.variant
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Decode every configured column present in `table`.
    ///
    /// Fails before touching the table when a configured column has no rule
    /// for this variant. A cell that doesn't fit its rule fails the whole
    /// column, which also happens when converting an already converted
    /// table.
    pub fn convert_metrics(&self, table: &mut Table) -> Result<()> {
        let plan = self
            .columns
            .iter()
            .map(|col| {
                self.variant
                    .rule_for(col)
                    .map(|kind| (col.as_str(), kind))
                    .ok_or_else(|| FrameError::UnknownConversion {
                        variant: self.variant.name(),
                        column: col.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        for (column, kind) in plan {
            let converted = table.map_column(column, |value| self.decode(column, kind, value))?;
            if converted && debug_enabled() {
                eprintln!("[DEBUG] converted {} column {column} as {}", self.variant.name(), kind.name());
            }
        }
        Ok(())
    }

    fn decode(&self, column: &str, kind: ConversionKind, value: &Value) -> Result<Value> {
        let mismatch = || FrameError::Conversion {
            column: column.to_string(),
            kind: kind.name(),
            found: value.type_name(),
        };
        match (kind, value) {
            (_, Value::Null) => Ok(Value::Null),
            (ConversionKind::Timestamp, Value::Text(s)) => {
                let dt = DateTime::parse_from_rfc3339(s.trim()).map_err(|_| mismatch())?;
                Ok(Value::DateTime(match self.timezone {
                    Some(tz) => tz.to_fixed_offset(dt),
                    None => dt,
                }))
            }
            (ConversionKind::Timespan, Value::Int(secs)) => TimeDelta::try_seconds(*secs)
                .map(Value::Duration)
                .ok_or_else(mismatch),
            (ConversionKind::Timespan, Value::Float(secs)) => {
                let millis = (secs * 1000.0).round();
                // out-of-range casts would saturate instead of failing
                if !millis.is_finite() || millis.abs() >= MAX_MILLIS {
                    return Err(mismatch());
                }
                TimeDelta::try_milliseconds(millis as i64)
                    .map(Value::Duration)
                    .ok_or_else(mismatch)
            }
            (ConversionKind::Hypnogram, Value::Text(s)) => Ok(Value::Hypnogram(decode_hypnogram(s)?)),
            _ => Err(mismatch()),
        }
    }
}
