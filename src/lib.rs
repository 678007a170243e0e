//! Oura ring summaries as date-keyed tables.
//!
//! Fetch a summary through [`Client`], get back a [`Table`] with one row per
//! day, optionally decoded by a [`Converter`], and hand it to one of the
//! [`export`] helpers.
//!
//! ```no_run
//! use oura_tables::{Client, Config, SummaryQuery, export};
//!
//! let client = Client::from_config(&Config::load())?;
//! let sleep = client.fetch_sleep(&SummaryQuery::new().metrics(["score", "total"]))?;
//! export::format_table(&sleep, export::TableStyle::Pretty, true);
//! # Ok::<(), oura_tables::FrameError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
mod consts;
pub mod convert;
pub mod error;
pub mod export;
pub mod table;
mod utils;

pub use api::{ApiVersion, DateRange, Endpoint, HttpSource, SummaryKind, SummarySource};
pub use client::{Client, SummaryQuery};
pub use config::Config;
pub use consts::DEFAULT_KEY_COLUMN;
pub use convert::{ConversionKind, Converter, SleepStage, SummaryVariant};
pub use error::{FrameError, Result};
pub use table::{Metrics, Record, Table, Value, records_from_json, tabularize, tabularize_default};
pub use utils::{Timezone, debug_enabled, set_debug};
