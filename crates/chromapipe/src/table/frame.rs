//! In-memory table of named, equal-length columns.

use indexmap::IndexMap;
use serde::Serialize;

use super::column::Column;
use crate::error::{PipelineError, Result};

/// Column-major table keyed by column name, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table {
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    ///
    /// The first column fixes the row count; later columns must match it.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(PipelineError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(PipelineError::LengthMismatch {
                expected: self.row_count(),
                found: column.len(),
            });
        }
        self.columns.insert(name, column);
        Ok(())
    }

    /// Builder-style variant of [`Table::push_column`].
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Result<Self> {
        self.push_column(name, column)?;
        Ok(self)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.values().next().map(Column::len).unwrap_or(0)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Column names in file order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get the values of a numeric column, failing if it is absent or text.
    pub fn numeric_column(&self, name: &str) -> Result<&[f64]> {
        let column = self
            .column(name)
            .ok_or_else(|| PipelineError::ColumnNotFound(name.to_string()))?;
        column
            .as_numeric()
            .ok_or_else(|| PipelineError::NonNumericColumn(name.to_string()))
    }

    /// Iterate over `(name, column)` pairs in order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, column)| (name.as_str(), column))
    }

    /// Iterate over numeric columns only.
    pub fn numeric_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .filter_map(|(name, column)| column.as_numeric().map(|values| (name.as_str(), values)))
    }

    /// New table holding the first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.head(n)))
                .collect(),
        }
    }

    /// Build a table from already-validated columns.
    pub(crate) fn from_columns(columns: IndexMap<String, Column>) -> Self {
        Self { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new()
            .with_column("retention_time", Column::Numeric(vec![1.0, 2.0, 3.0]))
            .unwrap()
            .with_column(
                "compound",
                Column::Text(vec![
                    Some("caffeine".to_string()),
                    Some("theobromine".to_string()),
                    None,
                ]),
            )
            .unwrap()
    }

    #[test]
    fn test_shape_and_names() {
        let table = sample_table();
        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.column_names(), vec!["retention_time", "compound"]);
        assert!(table.contains_column("compound"));
        assert!(!table.contains_column("intensity"));
    }

    #[test]
    fn test_push_column_rejects_length_mismatch() {
        let mut table = sample_table();
        let err = table
            .push_column("intensity", Column::Numeric(vec![1.0]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::LengthMismatch { .. }));
    }

    #[test]
    fn test_push_column_rejects_duplicate() {
        let mut table = sample_table();
        let err = table
            .push_column("compound", Column::Text(vec![None, None, None]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::DuplicateColumn(name) if name == "compound"));
    }

    #[test]
    fn test_numeric_column_errors() {
        let table = sample_table();
        assert_eq!(table.numeric_column("retention_time").unwrap(), &[1.0, 2.0, 3.0]);
        assert!(matches!(
            table.numeric_column("compound"),
            Err(PipelineError::NonNumericColumn(_))
        ));
        assert!(matches!(
            table.numeric_column("missing"),
            Err(PipelineError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_numeric_columns_skips_text() {
        let table = sample_table();
        let names: Vec<&str> = table.numeric_columns().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["retention_time"]);
    }

    #[test]
    fn test_head_leaves_source_untouched() {
        let table = sample_table();
        let head = table.head(2);
        assert_eq!(head.shape(), (2, 2));
        assert_eq!(table.shape(), (3, 2));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new();
        assert_eq!(table.shape(), (0, 0));
        assert!(table.column_names().is_empty());
    }
}
