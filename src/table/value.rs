use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use std::fmt;

use crate::consts::DATE_FORMAT;
use crate::convert::{SleepStage, format_hypnogram};

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    /// Timezone-aware instant
    DateTime(DateTime<FixedOffset>),
    Duration(TimeDelta),
    Hypnogram(Vec<SleepStage>),
    /// Nested object or array, kept as received
    Json(serde_json::Value),
}

impl Value {
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Json(other.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::Hypnogram(_) => "hypnogram",
            Value::Json(_) => "json",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::json!(b),
            Value::Int(i) => serde_json::json!(i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(s) => serde_json::json!(s),
            Value::Date(d) => serde_json::json!(d.format(DATE_FORMAT).to_string()),
            Value::DateTime(dt) => serde_json::json!(dt.to_rfc3339()),
            Value::Duration(d) => serde_json::json!(d.num_seconds()),
            Value::Hypnogram(stages) => serde_json::json!(format_hypnogram(stages)),
            Value::Json(v) => v.clone(),
        }
    }
}

/// Format a duration as `H:MM:SS`
pub(crate) fn format_duration(d: TimeDelta) -> String {
    let sign = if d < TimeDelta::zero() { "-" } else { "" };
    let total = d.num_seconds().abs();
    format!(
        "{sign}{}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%:z")),
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::Hypnogram(stages) => f.write_str(&format_hypnogram(stages)),
            Value::Json(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_scalars() {
        assert_eq!(Value::from_json(&json!(null)), Value::Null);
        assert_eq!(Value::from_json(&json!(true)), Value::Bool(true));
        assert_eq!(Value::from_json(&json!(85)), Value::Int(85));
        assert_eq!(Value::from_json(&json!(36.5)), Value::Float(36.5));
        assert_eq!(
            Value::from_json(&json!("2020-10-31")),
            Value::Text("2020-10-31".to_string())
        );
    }

    #[test]
    fn from_json_keeps_nested_values() {
        let nested = json!({"activity_balance": 80, "body_temperature": 97});
        assert_eq!(Value::from_json(&nested), Value::Json(nested.clone()));
        assert_eq!(Value::from_json(&json!([1, 2])), Value::Json(json!([1, 2])));
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(TimeDelta::seconds(0)), "0:00:00");
        assert_eq!(format_duration(TimeDelta::seconds(27_030)), "7:30:30");
        assert_eq!(format_duration(TimeDelta::seconds(-90)), "-0:01:30");
    }

    #[test]
    fn display_datetime_keeps_offset() {
        let dt = DateTime::parse_from_rfc3339("2020-10-31T23:15:00+02:00").unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "2020-10-31 23:15:00+02:00");
    }

    #[test]
    fn null_displays_empty() {
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn to_json_encodes_decoded_values() {
        let d = NaiveDate::from_ymd_opt(2020, 10, 31).unwrap();
        assert_eq!(Value::Date(d).to_json(), json!("2020-10-31"));
        assert_eq!(Value::Duration(TimeDelta::seconds(600)).to_json(), json!(600));
        assert_eq!(
            Value::Hypnogram(vec![SleepStage::Awake, SleepStage::Deep]).to_json(),
            json!("AD")
        );
    }
}
