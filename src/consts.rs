/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Key column used by the v1 daily summaries
pub const DEFAULT_KEY_COLUMN: &str = "summary_date";

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.ouraring.com";

/// Spreadsheet cell formats
pub(crate) const XLSX_DATE_FORMAT: &str = "m/d/yyyy";
pub(crate) const XLSX_DATETIME_FORMAT: &str = "m/d/yyyy h:mmAM/PM";
pub(crate) const XLSX_DURATION_FORMAT: &str = "[h]:mm:ss";
