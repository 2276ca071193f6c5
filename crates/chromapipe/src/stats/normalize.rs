//! Min-max normalization of numeric columns.

use std::ops::Deref;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::table::{Column, Table};

/// A table whose numeric columns have been rescaled to `[0, 1]`.
///
/// Only [`normalize`] produces one. Text columns are carried over unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedTable(Table);

impl NormalizedTable {
    pub fn as_table(&self) -> &Table {
        &self.0
    }

    pub fn into_inner(self) -> Table {
        self.0
    }

    /// First `n` rows, still normalized against the full column range.
    pub fn head(&self, n: usize) -> NormalizedTable {
        NormalizedTable(self.0.head(n))
    }
}

impl Deref for NormalizedTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.0
    }
}

/// Rescale every numeric column with `(v - min) / (max - min)`.
///
/// The input is left untouched. NaN cells are ignored when finding the range
/// and stay NaN. A constant column has a zero range, so every value becomes NaN.
pub fn normalize(table: &Table) -> NormalizedTable {
    let columns: IndexMap<String, Column> = table
        .columns()
        .map(|(name, column)| {
            let scaled = match column {
                Column::Numeric(values) => Column::Numeric(min_max_scale(name, values)),
                Column::Text(_) => column.clone(),
            };
            (name.to_string(), scaled)
        })
        .collect();

    NormalizedTable(Table::from_columns(columns))
}

fn min_max_scale(name: &str, values: &[f64]) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    if range == 0.0 {
        debug!("Column '{}' has zero range; normalized values are NaN", name);
    }

    values.iter().map(|&v| (v - min) / range).collect()
}
