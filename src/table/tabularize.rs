use chrono::NaiveDate;
use std::collections::HashMap;

use crate::consts::DEFAULT_KEY_COLUMN;
use crate::error::{FrameError, Result};
use crate::table::{Table, Value};
use crate::utils::{debug_enabled, parse_key_date};

/// One API response element: field name to value, in received order
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Columns requested by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics(Vec<String>);

impl Metrics {
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Metrics {
    fn from(name: &str) -> Self {
        Metrics(vec![name.to_string()])
    }
}

impl From<String> for Metrics {
    fn from(name: String) -> Self {
        Metrics(vec![name])
    }
}

impl From<Vec<String>> for Metrics {
    fn from(names: Vec<String>) -> Self {
        Metrics(names)
    }
}

impl From<Vec<&str>> for Metrics {
    fn from(names: Vec<&str>) -> Self {
        Metrics(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Metrics {
    fn from(names: &[&str]) -> Self {
        Metrics(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Metrics {
    fn from(names: [&str; N]) -> Self {
        Metrics(names.iter().map(|s| s.to_string()).collect())
    }
}

/// Accept either a lone record or an array of records
pub fn records_from_json(value: serde_json::Value) -> Result<Vec<Record>> {
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Object(map) => Ok(vec![map]),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Object(map) => Ok(map),
                other => Err(FrameError::NotARecord {
                    found: Value::from_json(&other).type_name(),
                }),
            })
            .collect(),
        other => Err(FrameError::NotARecord {
            found: Value::from_json(&other).type_name(),
        }),
    }
}

/// Union of record fields in first-seen order
fn collect_columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for field in record.keys() {
            if !columns.iter().any(|c| c == field) {
                columns.push(field.clone());
            }
        }
    }
    columns
}

fn select_columns(available: Vec<String>, metrics: Option<&Metrics>, key: &str) -> Vec<String> {
    let Some(metrics) = metrics else {
        return available;
    };
    let mut selected: Vec<String> = Vec::new();
    for name in metrics.names() {
        // drop names the data doesn't have
        if available.contains(name) && !selected.contains(name) {
            selected.push(name.clone());
        }
    }
    if !selected.iter().any(|c| c == key) {
        selected.insert(0, key.to_string());
    }
    selected
}

fn key_date(record: &Record, key: &str) -> Result<NaiveDate> {
    let invalid = |input: String| FrameError::InvalidDate {
        column: key.to_string(),
        input,
    };
    match record.get(key) {
        Some(serde_json::Value::String(s)) => parse_key_date(s).ok_or_else(|| invalid(s.clone())),
        Some(other) => Err(invalid(other.to_string())),
        None => Err(invalid("null".to_string())),
    }
}

/// Build a date-keyed table from records.
///
/// An empty input yields [`Table::empty`]. When `metrics` is given the
/// table keeps only those columns that exist, plus the key. Records whose
/// key parses to an already seen date replace the earlier row in place.
pub fn tabularize(records: &[Record], metrics: Option<&Metrics>, key_column: &str) -> Result<Table> {
    if records.is_empty() {
        return Ok(Table::empty());
    }

    let available = collect_columns(records);
    if !available.iter().any(|c| c == key_column) {
        return Err(FrameError::MissingKeyColumn {
            column: key_column.to_string(),
        });
    }
    let columns: Vec<String> = select_columns(available, metrics, key_column)
        .into_iter()
        .filter(|c| c != key_column)
        .collect();

    let mut index: Vec<NaiveDate> = Vec::with_capacity(records.len());
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());
    let mut seen: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        let date = key_date(record, key_column)?;
        let row: Vec<Value> = columns
            .iter()
            .map(|c| record.get(c).map_or(Value::Null, Value::from_json))
            .collect();

        if let Some(&pos) = seen.get(&date) {
            if debug_enabled() {
                eprintln!("[DEBUG] duplicate {key_column} {date}, keeping the later record");
            }
            rows[pos] = row;
        } else {
            seen.insert(date, rows.len());
            index.push(date);
            rows.push(row);
        }
    }

    Ok(Table::from_parts(
        Some(key_column.to_string()),
        index,
        columns,
        rows,
    ))
}

/// [`tabularize`] keyed on `summary_date`
pub fn tabularize_default(records: &[Record], metrics: Option<&Metrics>) -> Result<Table> {
    tabularize(records, metrics, DEFAULT_KEY_COLUMN)
}

impl Table {
    /// Keyless table, one row per record (used for profile-style payloads)
    pub fn unindexed(records: &[Record]) -> Table {
        let columns = collect_columns(records);
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).map_or(Value::Null, Value::from_json))
                    .collect()
            })
            .collect();
        Table::from_parts(None, Vec::new(), columns, rows)
    }
}
