use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrameError>;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date \"{input}\" in column {column}")]
    InvalidDate { column: String, input: String },

    #[error("Expected a JSON object record, found {found}")]
    NotARecord { found: &'static str },

    #[error("Key column \"{column}\" not found in records")]
    MissingKeyColumn { column: String },

    #[error("No {variant} conversion registered for column \"{column}\"")]
    UnknownConversion {
        variant: &'static str,
        column: String,
    },

    #[error("Cannot decode {kind} from {found} in column \"{column}\"")]
    Conversion {
        column: String,
        kind: &'static str,
        found: &'static str,
    },

    #[error("Invalid hypnogram stage '{code}'")]
    InvalidHypnogram { code: char },

    #[error("{kind} is not available in API {version}")]
    UnsupportedKind {
        kind: &'static str,
        version: &'static str,
    },

    #[error("Response has no \"{field}\" field")]
    MissingField { field: String },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Cannot join tables keyed by different kinds of index")]
    MismatchedKeys,

    #[error("Duplicate column \"{column}\" in joined table")]
    DuplicateColumn { column: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Unsupported table style: {input}")]
    UnsupportedStyle { input: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Table has {count} columns, more than a worksheet holds")]
    TooManyColumns { count: usize },

    #[error("Spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
