//! Date-keyed tables built from API records
//!
//! A `Table` holds rows that share one column set. Keyed tables carry one
//! unique date per row; the key column lives in the index, not among the
//! regular columns.

mod join;
mod tabularize;
mod value;

use chrono::NaiveDate;

use crate::error::Result;

pub use tabularize::{Metrics, Record, records_from_json, tabularize, tabularize_default};
pub use value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    key: Option<String>,
    index: Vec<NaiveDate>,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Table with no columns, no rows and no key
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        key: Option<String>,
        index: Vec<NaiveDate>,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        debug_assert!(key.is_none() || index.len() == rows.len());
        Self {
            key,
            index,
            columns,
            rows,
        }
    }

    /// Name of the column promoted to the index, if the table is keyed
    pub fn key_name(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn row_position(&self, date: NaiveDate) -> Option<usize> {
        self.index.iter().position(|d| *d == date)
    }

    /// Cell lookup by key date and column name
    pub fn get(&self, date: NaiveDate, column: &str) -> Option<&Value> {
        let row = self.row_position(date)?;
        let col = self.column_position(column)?;
        self.rows[row].get(col)
    }

    /// Cell lookup by row position, for unindexed tables
    pub fn get_at(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_position(column)?;
        self.rows.get(row)?.get(col)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let col = self.column_position(name)?;
        Some(self.rows.iter().map(|r| &r[col]).collect())
    }

    /// Iterate rows in order, paired with their key date when keyed
    pub fn rows(&self) -> impl Iterator<Item = (Option<NaiveDate>, &[Value])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| (self.index.get(i).copied(), r.as_slice()))
    }

    /// Rewrite every cell of a column. All new values are computed before
    /// any is stored, so a failing cell leaves the column untouched.
    /// Returns false when the column is absent.
    pub(crate) fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<bool>
    where
        F: FnMut(&Value) -> Result<Value>,
    {
        let Some(col) = self.column_position(name) else {
            return Ok(false);
        };
        let decoded = self
            .rows
            .iter()
            .map(|r| f(&r[col]))
            .collect::<Result<Vec<_>>>()?;
        for (row, value) in self.rows.iter_mut().zip(decoded) {
            row[col] = value;
        }
        Ok(true)
    }

    pub fn rename_columns<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> String,
    {
        for col in &mut self.columns {
            *col = rename(col);
        }
    }

    /// Rename every non-key column to `<prefix>:<column>`
    pub fn prefix_columns(&mut self, prefix: &str) {
        self.rename_columns(|col| format!("{prefix}:{col}"));
    }
}
