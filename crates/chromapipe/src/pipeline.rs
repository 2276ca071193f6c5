//! Main Pipeline struct and public API.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::plot;
use crate::stats::{self, NormalizedTable, RegressionResult, SummaryStatistics};
use crate::table::Table;

/// Extension (case-sensitive) of files picked up by [`Pipeline::list_data_files`].
pub const DATA_FILE_EXTENSION: &str = ".csv";

/// Predictor/response column pair used by [`Pipeline::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionColumns {
    pub predictor: String,
    pub response: String,
}

impl RegressionColumns {
    pub fn new(predictor: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            predictor: predictor.into(),
            response: response.into(),
        }
    }
}

impl Default for RegressionColumns {
    /// Intensity as a function of retention time.
    fn default() -> Self {
        Self::new("retention_time", "intensity")
    }
}

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Columns to regress when both are present (None = never fit).
    pub regression: Option<RegressionColumns>,
    /// Rows included in the report previews.
    pub preview_rows: usize,
    /// Sort listed file names instead of keeping directory order.
    pub sort_files: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            regression: Some(RegressionColumns::default()),
            preview_rows: 5,
            sort_files: false,
        }
    }
}

/// Everything [`Pipeline::process`] learned about one file.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    /// File name as passed to `process`.
    pub filename: String,
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// `(rows, columns)`.
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    /// First rows of the raw table.
    pub head: Table,
    /// First rows of the normalized table.
    pub normalized_head: NormalizedTable,
    pub summary_statistics: SummaryStatistics,
    /// `None` when the regression columns are not both present.
    pub linear_regression: Option<RegressionResult>,
}

impl ProcessReport {
    /// Pretty-printed JSON. NaN values are written as `null`.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loads and analyzes the CSV files of one data directory.
pub struct Pipeline {
    data_dir: PathBuf,
    config: PipelineConfig,
    parser: Parser,
}

impl Pipeline {
    /// Create a pipeline over `data_dir` with default configuration.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(data_dir, PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(data_dir: impl Into<PathBuf>, config: PipelineConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self {
            data_dir: data_dir.into(),
            config,
            parser,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Names of the `.csv` entries in the data directory.
    ///
    /// Order is whatever the directory enumeration returns unless
    /// `sort_files` is set. Names that are not valid UTF-8 are skipped.
    pub fn list_data_files(&self) -> Result<Vec<String>> {
        let io_err = |source| PipelineError::Io {
            path: self.data_dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.data_dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                warn!("Skipping non UTF-8 file name {:?}", file_name);
                continue;
            };
            if name.ends_with(DATA_FILE_EXTENSION) {
                files.push(name.to_string());
            }
        }

        if self.config.sort_files {
            files.sort();
        }

        debug!(
            "Found {} data files in {}",
            files.len(),
            self.data_dir.display()
        );
        Ok(files)
    }

    /// Load `filename` from the data directory.
    pub fn load_data(&self, filename: &str) -> Result<Table> {
        self.load_data_with_source(filename).map(|(table, _)| table)
    }

    /// Load `filename` along with its source metadata.
    pub fn load_data_with_source(&self, filename: &str) -> Result<(Table, SourceMetadata)> {
        self.parser.parse_file(self.data_dir.join(filename))
    }

    /// Min-max normalize the numeric columns into a new table.
    pub fn normalize(&self, table: &Table) -> NormalizedTable {
        stats::normalize(table)
    }

    /// Descriptive statistics for the numeric columns.
    pub fn summary_statistics(&self, table: &Table) -> SummaryStatistics {
        stats::summary_statistics(table)
    }

    /// Least-squares fit of `response` on `predictor`.
    pub fn fit_linear_regression(
        &self,
        table: &Table,
        predictor: &str,
        response: &str,
    ) -> Result<RegressionResult> {
        stats::fit_linear_regression(table, predictor, response)
    }

    /// Show the data and fitted line in a window.
    pub fn plot_regression(
        &self,
        table: &Table,
        predictor: &str,
        response: &str,
        regression: &RegressionResult,
    ) -> Result<()> {
        plot::show_regression(table, predictor, response, regression)
    }

    /// Load, normalize, summarize and, when the regression columns are
    /// present, fit (and optionally plot) one file.
    pub fn process(&self, filename: &str, plot: bool) -> Result<ProcessReport> {
        info!("Processing {}", filename);

        let (table, source) = self.load_data_with_source(filename)?;
        let normalized = self.normalize(&table);
        let summary_statistics = self.summary_statistics(&table);

        let linear_regression = match &self.config.regression {
            Some(columns)
                if table.contains_column(&columns.predictor)
                    && table.contains_column(&columns.response) =>
            {
                let fit =
                    self.fit_linear_regression(&table, &columns.predictor, &columns.response)?;
                if plot {
                    self.plot_regression(&table, &columns.predictor, &columns.response, &fit)?;
                }
                Some(fit)
            }
            Some(columns) => {
                info!(
                    "Skipping regression: '{}' and '{}' are not both present",
                    columns.predictor, columns.response
                );
                None
            }
            None => None,
        };

        let preview_rows = self.config.preview_rows;
        Ok(ProcessReport {
            filename: filename.to_string(),
            source,
            shape: table.shape(),
            columns: table.column_names(),
            head: table.head(preview_rows),
            normalized_head: normalized.head(preview_rows),
            summary_statistics,
            linear_regression,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn data_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_list_is_case_sensitive() {
        let dir = data_dir(&[("a.csv", "x\n1\n"), ("b.txt", ""), ("c.CSV", "x\n1\n")]);
        let pipeline = Pipeline::new(dir.path());

        assert_eq!(pipeline.list_data_files().unwrap(), vec!["a.csv"]);
    }

    #[test]
    fn test_list_sorted() {
        let dir = data_dir(&[("b.csv", ""), ("a.csv", ""), ("c.csv", "")]);
        let pipeline = Pipeline::with_config(
            dir.path(),
            PipelineConfig {
                sort_files: true,
                ..PipelineConfig::default()
            },
        );

        assert_eq!(
            pipeline.list_data_files().unwrap(),
            vec!["a.csv", "b.csv", "c.csv"]
        );
    }

    #[test]
    fn test_list_missing_dir() {
        let pipeline = Pipeline::new("/definitely/not/a/real/dir");
        assert!(matches!(
            pipeline.list_data_files(),
            Err(PipelineError::Io { .. })
        ));
    }

    #[test]
    fn test_process_with_regression() {
        let dir = data_dir(&[(
            "run.csv",
            "retention_time,intensity,compound\n1,2,a\n2,4,b\n3,6,c\n",
        )]);
        let pipeline = Pipeline::new(dir.path());
        let report = pipeline.process("run.csv", false).unwrap();

        assert_eq!(report.shape, (3, 3));
        let fit = report.linear_regression.unwrap();
        assert!((fit.coefficient - 2.0).abs() < 1e-12);
        assert_eq!(report.summary_statistics.len(), 2);
    }

    #[test]
    fn test_process_without_regression_columns() {
        let dir = data_dir(&[("run.csv", "mz,area\n100.1,5\n200.2,7\n")]);
        let pipeline = Pipeline::new(dir.path());
        let report = pipeline.process("run.csv", false).unwrap();

        assert!(report.linear_regression.is_none());
    }

    #[test]
    fn test_process_plot_skipped_without_regression_columns() {
        let dir = data_dir(&[("run.csv", "mz,area\n100.1,5\n200.2,7\n")]);
        let pipeline = Pipeline::new(dir.path());
        let report = pipeline.process("run.csv", true).unwrap();

        assert!(report.linear_regression.is_none());
    }

    #[cfg(not(feature = "plot"))]
    #[test]
    fn test_process_plot_unavailable() {
        let dir = data_dir(&[("run.csv", "retention_time,intensity\n1,2\n2,4\n3,6\n")]);
        let pipeline = Pipeline::new(dir.path());

        assert!(matches!(
            pipeline.process("run.csv", true),
            Err(PipelineError::PlotUnavailable)
        ));
    }

    #[test]
    fn test_process_custom_columns() {
        let dir = data_dir(&[("run.csv", "mz,area\n1,3\n2,5\n3,7\n")]);
        let pipeline = Pipeline::with_config(
            dir.path(),
            PipelineConfig {
                regression: Some(RegressionColumns::new("mz", "area")),
                ..PipelineConfig::default()
            },
        );
        let fit = pipeline
            .process("run.csv", false)
            .unwrap()
            .linear_regression
            .unwrap();

        assert!((fit.coefficient - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_process_regression_disabled() {
        let dir = data_dir(&[("run.csv", "retention_time,intensity\n1,2\n2,4\n")]);
        let pipeline = Pipeline::with_config(
            dir.path(),
            PipelineConfig {
                regression: None,
                ..PipelineConfig::default()
            },
        );
        assert!(pipeline.process("run.csv", false).unwrap().linear_regression.is_none());
    }

    #[test]
    fn test_preview_rows() {
        let content = "x\n1\n2\n3\n4\n5\n6\n7\n";
        let dir = data_dir(&[("run.csv", content)]);
        let pipeline = Pipeline::new(dir.path());
        let report = pipeline.process("run.csv", false).unwrap();

        assert_eq!(report.shape, (7, 1));
        assert_eq!(report.head.row_count(), 5);
        assert_eq!(report.normalized_head.row_count(), 5);
    }
}
