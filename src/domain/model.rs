use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ID_COLUMN: &str = "ERP ID";
pub const DEFAULT_BATCH_COLUMN: &str = "Batch";
pub const DEFAULT_DATE_COLUMN: &str = "Date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub i64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column names the matcher reads from the master file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentColumns {
    pub id: String,
    pub batch: String,
}

impl Default for StudentColumns {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID_COLUMN.to_string(),
            batch: DEFAULT_BATCH_COLUMN.to_string(),
        }
    }
}

/// An in-memory table: a header plus rows of string cells of the same width.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// New dataset with the same header holding only the rows `keep` accepts.
    pub fn filter_rows<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(&[String]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| keep(row))
            .cloned()
            .collect();

        Dataset {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Rows as JSON objects keyed by header, column order preserved.
    pub fn to_json_records(&self) -> Vec<serde_json::Value> {
        self.rows
            .iter()
            .map(|row| {
                let object = self
                    .headers
                    .iter()
                    .zip(row.iter())
                    .map(|(h, v)| (h.clone(), serde_json::Value::String(v.clone())))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            "students.csv",
            vec!["ERP ID".into(), "Name".into(), "Batch".into()],
            vec![
                vec!["1001".into(), "Asha".into(), "K1".into()],
                vec!["1002".into(), "Bilal".into(), "K2".into()],
            ],
        )
    }

    #[test]
    fn test_value_lookup() {
        let ds = sample();
        assert_eq!(ds.value(1, "Name"), Some("Bilal"));
        assert_eq!(ds.value(0, "Missing"), None);
        assert_eq!(ds.value(5, "Name"), None);
        assert!(ds.has_column("Batch"));
    }

    #[test]
    fn test_filter_rows_keeps_header_and_order() {
        let ds = sample();
        let filtered = ds.filter_rows(|row| row[2] == "K2");
        assert_eq!(filtered.headers, ds.headers);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows[0][0], "1002");
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_json_records_preserve_column_order() {
        let records = sample().to_json_records();
        let keys: Vec<&String> = records[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["ERP ID", "Name", "Batch"]);
    }
}
