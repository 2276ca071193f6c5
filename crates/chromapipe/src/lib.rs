//! chromapipe: a small analysis pipeline for chromatography and mass
//! spectrometry CSV exports.
//!
//! A [`Pipeline`] points at a directory of CSV files. For each file it can
//! load a typed [`Table`], produce a min-max normalized copy, compute
//! descriptive statistics for the numeric columns, and fit intensity against
//! retention time with ordinary least squares.
//!
//! # Example
//!
//! ```no_run
//! use chromapipe::Pipeline;
//!
//! let pipeline = Pipeline::new("data");
//! for file in pipeline.list_data_files().unwrap() {
//!     let report = pipeline.process(&file, false).unwrap();
//!     println!("{}: {:?}", report.filename, report.linear_regression);
//! }
//! ```

pub mod error;
pub mod input;
pub mod plot;
pub mod stats;
pub mod table;

mod pipeline;

pub use crate::pipeline::{
    DATA_FILE_EXTENSION, Pipeline, PipelineConfig, ProcessReport, RegressionColumns,
};
pub use error::{PipelineError, Result};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use stats::{
    ColumnSummary, NormalizedTable, RegressionResult, SummaryStatistics, fit_linear_regression,
    normalize, summary_statistics,
};
pub use table::{Column, ColumnKind, Table};
