//! Column-Major Log Table Model

use serde::{Deserialize, Serialize};

/// Minimum finite samples for a column to appear in plotting menus
pub const MIN_PLOTTABLE_SAMPLES: usize = 5;

/// Parsed datalog as parallel equal-length numeric columns
///
/// Unparseable cells are stored as NaN so that column lengths always equal
/// the row count. Duplicate header names are preserved as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTable {
    /// Header names, order = column order
    pub headers: Vec<String>,
    /// One column per header, all equal length
    pub columns: Vec<Vec<f64>>,
    /// Index of the canonical time axis, if one was recognized
    pub time_index: Option<usize>,
    /// Key/value pairs recovered from `#` comment lines, in file order
    pub metadata: Vec<(String, String)>,
}

impl ColumnTable {
    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Values of one column
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Header name of one column
    pub fn header(&self, index: usize) -> Option<&str> {
        self.headers.get(index).map(String::as_str)
    }

    /// The time column, when a time channel was recognized
    pub fn time_column(&self) -> Option<&[f64]> {
        self.column(self.time_index?)
    }

    /// Number of finite values in one column
    pub fn finite_count(&self, index: usize) -> usize {
        self.column(index)
            .map(|col| col.iter().filter(|v| v.is_finite()).count())
            .unwrap_or(0)
    }

    /// Columns with enough finite samples to be worth plotting
    pub fn plottable_columns(&self) -> Vec<usize> {
        (0..self.column_count())
            .filter(|&i| self.finite_count(i) >= MIN_PLOTTABLE_SAMPLES)
            .collect()
    }

    /// First metadata value recorded for a key
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ColumnTable {
        ColumnTable {
            headers: vec!["Time".into(), "RPM".into(), "Flags".into()],
            columns: vec![
                vec![0.0, 1.0, 2.0, 3.0, 4.0],
                vec![900.0, 1500.0, 2200.0, 3100.0, 4000.0],
                vec![f64::NAN, f64::NAN, 1.0, f64::NAN, f64::NAN],
            ],
            time_index: Some(0),
            metadata: vec![("Vehicle".into(), "Test GTI".into())],
        }
    }

    #[test]
    fn test_row_and_column_counts() {
        let table = sample_table();
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_time_column_lookup() {
        let table = sample_table();
        assert_eq!(table.time_column().unwrap()[4], 4.0);
    }

    #[test]
    fn test_plottable_excludes_sparse_columns() {
        let table = sample_table();
        // Flags has a single finite sample, below the menu threshold
        assert_eq!(table.plottable_columns(), vec![0, 1]);
    }

    #[test]
    fn test_metadata_value() {
        let table = sample_table();
        assert_eq!(table.metadata_value("Vehicle"), Some("Test GTI"));
        assert_eq!(table.metadata_value("Missing"), None);
    }
}
