use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::borrow::Cow;
use std::path::Path;

use crate::consts::{XLSX_DATE_FORMAT, XLSX_DATETIME_FORMAT, XLSX_DURATION_FORMAT};
use crate::convert::format_hypnogram;
use crate::error::{FrameError, Result};
use crate::table::{Table, Value};

/// Excel's column limit
const MAX_COLUMNS: usize = 16_384;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// What a cell becomes in the worksheet. Date-times lose their offset:
/// the sheet stores the wall-clock time the record reported.
#[derive(Debug, PartialEq)]
enum SheetCell<'a> {
    Empty,
    Bool(bool),
    Number(f64),
    Text(Cow<'a, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Fraction of a day, as Excel stores times
    Duration(f64),
}

fn sheet_cell(value: &Value) -> SheetCell<'_> {
    match value {
        Value::Null => SheetCell::Empty,
        Value::Bool(b) => SheetCell::Bool(*b),
        Value::Int(i) => SheetCell::Number(*i as f64),
        Value::Float(f) if f.is_finite() => SheetCell::Number(*f),
        Value::Float(_) => SheetCell::Empty,
        Value::Text(s) => SheetCell::Text(Cow::Borrowed(s)),
        Value::Date(d) => SheetCell::Date(*d),
        Value::DateTime(dt) => SheetCell::DateTime(dt.naive_local()),
        Value::Duration(d) => SheetCell::Duration(d.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY),
        Value::Hypnogram(stages) => SheetCell::Text(Cow::Owned(format_hypnogram(stages))),
        Value::Json(v) => SheetCell::Text(Cow::Owned(v.to_string())),
    }
}

struct Formats {
    header: Format,
    date: Format,
    datetime: Format,
    duration: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format(XLSX_DATE_FORMAT),
            datetime: Format::new().set_num_format(XLSX_DATETIME_FORMAT),
            duration: Format::new().set_num_format(XLSX_DURATION_FORMAT),
        }
    }
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: SheetCell<'_>,
    formats: &Formats,
) -> Result<()> {
    match cell {
        SheetCell::Empty => {}
        SheetCell::Bool(b) => {
            sheet.write_boolean(row, col, b)?;
        }
        SheetCell::Number(n) => {
            sheet.write_number(row, col, n)?;
        }
        SheetCell::Text(s) => {
            sheet.write_string(row, col, s.as_ref())?;
        }
        SheetCell::Date(d) => {
            sheet.write_datetime_with_format(row, col, &d, &formats.date)?;
        }
        SheetCell::DateTime(dt) => {
            sheet.write_datetime_with_format(row, col, &dt, &formats.datetime)?;
        }
        SheetCell::Duration(days) => {
            sheet.write_number_with_format(row, col, days, &formats.duration)?;
        }
    }
    Ok(())
}

/// Body cells of the sheet, one row per table row, index cell first
fn sheet_rows(table: &Table, include_index: bool) -> Vec<Vec<SheetCell<'_>>> {
    table
        .rows()
        .enumerate()
        .map(|(r, (key, values))| {
            let mut cells = Vec::with_capacity(values.len() + 1);
            if include_index {
                cells.push(match key {
                    Some(date) => SheetCell::Date(date),
                    None => SheetCell::Number(r as f64),
                });
            }
            cells.extend(values.iter().map(sheet_cell));
            cells
        })
        .collect()
}

/// Write `table` to a one-sheet `.xlsx` workbook at `path`.
///
/// With `include_index` the key column comes first (row numbers for
/// unindexed tables).
pub fn export_spreadsheet(table: &Table, path: impl AsRef<Path>, include_index: bool) -> Result<()> {
    let offset = usize::from(include_index);
    let width = table.columns().len() + offset;
    if width > MAX_COLUMNS {
        return Err(FrameError::TooManyColumns { count: width });
    }

    let formats = Formats::new();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    if include_index {
        sheet.write_string_with_format(0, 0, table.key_name().unwrap_or(""), &formats.header)?;
    }
    for (i, name) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, (i + offset) as u16, name, &formats.header)?;
    }

    for (r, cells) in sheet_rows(table, include_index).into_iter().enumerate() {
        let row = u32::try_from(r + 1).map_err(|_| rust_xlsxwriter::XlsxError::RowColumnLimitError)?;
        for (c, cell) in cells.into_iter().enumerate() {
            write_cell(sheet, row, c as u16, cell, &formats)?;
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}
