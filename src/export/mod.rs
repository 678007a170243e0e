//! Table exporters: spreadsheet, CSV, JSON records and text tables

mod csv;
mod json;
mod text;
mod xlsx;

pub use csv::{export_csv, to_csv};
pub use json::to_json_records;
pub use text::{TableStyle, format_table};
pub use xlsx::export_spreadsheet;
