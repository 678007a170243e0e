use serde_json::{Map, Value as JsonValue};

use crate::consts::DATE_FORMAT;
use crate::table::Table;

/// Array of row objects, key column first
pub fn to_json_records(table: &Table) -> JsonValue {
    let rows = table
        .rows()
        .map(|(key, values)| {
            let mut obj = Map::new();
            if let (Some(name), Some(date)) = (table.key_name(), key) {
                obj.insert(name.to_string(), JsonValue::String(date.format(DATE_FORMAT).to_string()));
            }
            for (col, value) in table.columns().iter().zip(values) {
                obj.insert(col.clone(), value.to_json());
            }
            JsonValue::Object(obj)
        })
        .collect();
    JsonValue::Array(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Converter, SummaryVariant};
    use crate::table::{records_from_json, tabularize_default};
    use serde_json::json;

    #[test]
    fn rows_carry_key_and_decoded_values() {
        let records = records_from_json(json!([
            {"summary_date": "2020-10-31", "total": 27000, "score": 82},
        ]))
        .unwrap();
        let mut table = tabularize_default(&records, None).unwrap();
        Converter::new(SummaryVariant::Sleep, None)
            .convert_metrics(&mut table)
            .unwrap();

        let out = to_json_records(&table);
        assert_eq!(
            out,
            json!([{"summary_date": "2020-10-31", "total": 27000, "score": 82}])
        );
        let first = out[0].as_object().unwrap();
        assert_eq!(first.keys().next().map(String::as_str), Some("summary_date"));
    }

    #[test]
    fn empty_table_is_empty_array() {
        assert_eq!(to_json_records(&Table::empty()), json!([]));
    }
}
