use std::fmt::Write;
use std::path::Path;

use crate::error::Result;
use crate::table::Table;

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render `table` as CSV, header first
pub fn to_csv(table: &Table, include_index: bool) -> String {
    let mut out = String::new();

    let mut header: Vec<String> = Vec::new();
    if include_index {
        header.push(csv_escape(table.key_name().unwrap_or("")));
    }
    header.extend(table.columns().iter().map(|c| csv_escape(c)));
    out.push_str(&header.join(","));
    out.push('\n');

    for (i, (key, values)) in table.rows().enumerate() {
        let mut fields: Vec<String> = Vec::with_capacity(values.len() + 1);
        if include_index {
            fields.push(match key {
                Some(date) => date.to_string(),
                None => i.to_string(),
            });
        }
        fields.extend(values.iter().map(|v| csv_escape(&v.to_string())));
        let _ = write!(out, "{}", fields.join(","));
        out.push('\n');
    }

    out
}

pub fn export_csv(table: &Table, path: impl AsRef<Path>, include_index: bool) -> Result<()> {
    std::fs::write(path, to_csv(table, include_index))?;
    Ok(())
}
