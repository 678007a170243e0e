use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table as TextTable, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS,
    presets::{ASCII_FULL, ASCII_MARKDOWN, NOTHING, UTF8_FULL},
};
use serde::Deserialize;

use crate::error::{FrameError, Result};
use crate::table::Table;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// Box-drawing borders
    #[default]
    Pretty,
    Ascii,
    Markdown,
    /// Aligned columns, no borders
    Plain,
}

impl TableStyle {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" => Ok(TableStyle::Pretty),
            "ascii" | "grid" => Ok(TableStyle::Ascii),
            "markdown" | "md" | "github" => Ok(TableStyle::Markdown),
            "plain" => Ok(TableStyle::Plain),
            _ => Err(FrameError::UnsupportedStyle {
                input: raw.trim().to_string(),
            }),
        }
    }
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut TextTable) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

fn create_table(style: TableStyle) -> TextTable {
    let mut table = TextTable::new();
    table.set_content_arrangement(ContentArrangement::Disabled);
    match style {
        TableStyle::Pretty => {
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_SOLID_INNER_BORDERS);
            normalize_header_separator(&mut table);
        }
        TableStyle::Ascii => {
            table.load_preset(ASCII_FULL);
        }
        TableStyle::Markdown => {
            table.load_preset(ASCII_MARKDOWN);
        }
        TableStyle::Plain => {
            table.load_preset(NOTHING);
        }
    }
    table
}

fn centered(text: impl ToString) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Center)
}

/// Render `table` with its key column first. Unindexed tables show the
/// row number instead.
pub fn format_table(table: &Table, style: TableStyle, print_output: bool) -> String {
    let mut out = create_table(style);

    let mut header = vec![centered(table.key_name().unwrap_or(""))];
    header.extend(table.columns().iter().map(centered));
    out.set_header(header);

    for (i, (key, values)) in table.rows().enumerate() {
        let mut row = vec![match key {
            Some(date) => centered(date),
            None => centered(i),
        }];
        row.extend(values.iter().map(centered));
        out.add_row(row);
    }

    let rendered = out.to_string();
    if print_output {
        println!("{rendered}");
    }
    rendered
}
