//! Normalization, descriptive statistics, and regression.

mod normalize;
mod regression;
mod summary;

pub use normalize::{NormalizedTable, normalize};
pub use regression::{RegressionResult, fit_linear_regression};
pub use summary::{ColumnSummary, SummaryStatistics, summary_statistics};
