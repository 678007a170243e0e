use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::{FrameError, Result};
use crate::table::{Table, Value};

impl Table {
    /// Inner join on the key date. Rows follow `self`'s order; dates missing
    /// from either side are dropped. The result keeps `self`'s key name.
    ///
    /// Joining with an empty, keyless table yields an empty table.
    pub fn inner_join(&self, other: &Table) -> Result<Table> {
        match (&self.key, &other.key) {
            (Some(_), Some(_)) => {}
            (None, _) if self.is_empty() => return Ok(Table::empty()),
            (_, None) if other.is_empty() => return Ok(Table::empty()),
            _ => return Err(FrameError::MismatchedKeys),
        }

        let mut columns = self.columns.clone();
        for col in &other.columns {
            if columns.contains(col) {
                return Err(FrameError::DuplicateColumn {
                    column: col.clone(),
                });
            }
            columns.push(col.clone());
        }

        let positions: HashMap<NaiveDate, usize> = other
            .index
            .iter()
            .enumerate()
            .map(|(i, d)| (*d, i))
            .collect();

        let mut index = Vec::new();
        let mut rows = Vec::new();
        for (date, left) in self.index.iter().zip(&self.rows) {
            let Some(&pos) = positions.get(date) else {
                continue;
            };
            let mut row: Vec<Value> = Vec::with_capacity(columns.len());
            row.extend(left.iter().cloned());
            row.extend(other.rows[pos].iter().cloned());
            index.push(*date);
            rows.push(row);
        }

        Ok(Table::from_parts(self.key.clone(), index, columns, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 10, d).unwrap()
    }

    fn keyed(key: &str, column: &str, days: &[u32]) -> Table {
        Table::from_parts(
            Some(key.to_string()),
            days.iter().map(|d| ymd(*d)).collect(),
            vec![column.to_string()],
            days.iter().map(|d| vec![Value::Int(i64::from(*d))]).collect(),
        )
    }

    #[test]
    fn keeps_only_shared_dates_in_left_order() {
        let left = keyed("summary_date", "a", &[3, 1, 2]);
        let right = keyed("summary_date", "b", &[2, 3, 4]);
        let joined = left.inner_join(&right).unwrap();
        assert_eq!(joined.index(), [ymd(3), ymd(2)]);
        assert_eq!(joined.columns(), ["a", "b"]);
        assert_eq!(joined.get(ymd(2), "b"), Some(&Value::Int(2)));
    }

    #[test]
    fn joins_across_differently_named_keys() {
        let left = keyed("day", "a", &[1, 2]);
        let right = keyed("timestamp", "b", &[2]);
        let joined = left.inner_join(&right).unwrap();
        assert_eq!(joined.key_name(), Some("day"));
        assert_eq!(joined.len(), 1);
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let left = keyed("day", "score", &[1]);
        let right = keyed("day", "score", &[1]);
        assert!(matches!(
            left.inner_join(&right),
            Err(FrameError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn empty_side_gives_empty_result() {
        let left = keyed("day", "a", &[1, 2]);
        assert!(left.inner_join(&Table::empty()).unwrap().is_empty());
        assert!(Table::empty().inner_join(&left).unwrap().is_empty());
    }

    #[test]
    fn unindexed_rows_cannot_join() {
        let left = keyed("day", "a", &[1]);
        let records = crate::table::records_from_json(serde_json::json!({"age": 3})).unwrap();
        let profile = Table::unindexed(&records);
        assert!(matches!(
            left.inner_join(&profile),
            Err(FrameError::MismatchedKeys)
        ));
    }
}
