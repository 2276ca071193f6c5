//! Typed column storage.

use serde::Serialize;

/// Storage type of a column, decided when the file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Floating-point values; missing cells are NaN.
    Numeric,
    /// Free text; missing cells are `None`.
    Text,
}

impl ColumnKind {
    /// Returns true if this kind is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

/// A single column of values.
///
/// Serializes as a plain JSON array. NaN serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<Option<String>>),
}

impl Column {
    /// Number of values (rows) in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Numeric(_) => ColumnKind::Numeric,
            Column::Text(_) => ColumnKind::Text,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Borrow the values of a numeric column.
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Column::Numeric(values) => Some(values),
            Column::Text(_) => None,
        }
    }

    /// Copy of the first `n` values.
    pub fn head(&self, n: usize) -> Column {
        match self {
            Column::Numeric(values) => Column::Numeric(values.iter().take(n).copied().collect()),
            Column::Text(values) => Column::Text(values.iter().take(n).cloned().collect()),
        }
    }
}
