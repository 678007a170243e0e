use oura_tables::export::{TableStyle, export_csv, export_spreadsheet, format_table, to_json_records};
use oura_tables::{
    Converter, FrameError, SummaryVariant, Table, Timezone, records_from_json, tabularize,
};
use serde_json::json;

fn converted_sleep() -> Table {
    let records = records_from_json(json!([
        {
            "summary_date": "2020-10-01",
            "bedtime_start": "2020-09-30T23:10:00+03:00",
            "bedtime_end": "2020-10-01T07:05:00+03:00",
            "total": 25200,
            "hypnogram_5min": "4222113",
            "score": 81
        },
        {
            "summary_date": "2020-10-02",
            "bedtime_start": "2020-10-01T22:40:00+03:00",
            "bedtime_end": "2020-10-02T06:20:00+03:00",
            "total": null,
            "hypnogram_5min": "4221",
            "score": 77.5
        }
    ]))
    .unwrap();
    let mut table = tabularize(&records, None, "summary_date").unwrap();
    Converter::new(SummaryVariant::Sleep, None)
        .with_timezone(Timezone::parse(Some("America/New_York")).unwrap())
        .convert_metrics(&mut table)
        .unwrap();
    table
}

#[test]
fn spreadsheet_with_timezone_aware_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sleep.xlsx");
    export_spreadsheet(&converted_sleep(), &path, true).unwrap();
    let meta = std::fs::metadata(&path).unwrap();
    assert!(meta.len() > 0);
}

#[test]
fn spreadsheet_without_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.xlsx");
    export_spreadsheet(&converted_sleep(), &path, false).unwrap();
    assert!(path.exists());
}

#[test]
fn spreadsheet_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir").join("out.xlsx");
    let err = export_spreadsheet(&converted_sleep(), &path, true).unwrap_err();
    assert!(matches!(err, FrameError::Spreadsheet(_)));
}

#[test]
fn empty_table_exports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    export_spreadsheet(&Table::empty(), &path, true).unwrap();
    assert!(path.exists());
}

#[test]
fn csv_file_has_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sleep.csv");
    export_csv(&converted_sleep(), &path, true).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("summary_date,"));
    assert!(lines[1].starts_with("2020-10-01,"));
}

#[test]
fn text_rendering_shows_every_column() {
    let table = converted_sleep();
    let out = format_table(&table, TableStyle::Markdown, false);
    for col in table.columns() {
        assert!(out.contains(col.as_str()), "missing {col}");
    }
    assert!(out.contains("2020-10-02"));
}

#[test]
fn json_records_carry_key() {
    let records = to_json_records(&converted_sleep());
    let rows = records.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["summary_date"], "2020-10-01");
    assert_eq!(rows[0]["total"], 25200);
    assert!(rows[1]["total"].is_null());
}
