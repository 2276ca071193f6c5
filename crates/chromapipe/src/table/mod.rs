//! Tabular data model.

mod column;
mod frame;

pub use column::{Column, ColumnKind};
pub use frame::Table;
