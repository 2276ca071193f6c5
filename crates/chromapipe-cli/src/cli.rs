//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// chromapipe: normalize, summarize and regress chromatography CSV exports
///
/// Without a subcommand, lists the data directory and processes the first
/// file found with the regression plot enabled.
#[derive(Parser)]
#[command(name = "chromapipe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing the CSV files (default: the bundled data directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the CSV files in the data directory
    List {
        /// Sort file names instead of using directory order
        #[arg(long)]
        sort: bool,
    },

    /// Process one data file and print its report
    Process {
        /// File name inside the data directory (default: the first one found)
        #[arg(value_name = "FILE")]
        file: Option<String>,

        /// Don't open the regression plot window
        #[arg(long)]
        no_plot: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Predictor (x) column for the regression
        #[arg(long, default_value = "retention_time")]
        predictor: String,

        /// Response (y) column for the regression
        #[arg(long, default_value = "intensity")]
        response: String,

        /// Skip the regression step entirely
        #[arg(long)]
        no_regression: bool,

        /// Rows shown in the raw and normalized previews
        #[arg(long, default_value = "5")]
        preview_rows: usize,

        /// Sort file names before picking the first one
        #[arg(long)]
        sort: bool,
    },
}

/// `data/` at the workspace root.
pub fn default_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["chromapipe"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.data_dir.is_none());
    }

    #[test]
    fn test_process_defaults() {
        let cli = Cli::try_parse_from(["chromapipe", "process", "run.csv", "--no-plot"]).unwrap();
        match cli.command {
            Some(Commands::Process {
                file,
                no_plot,
                predictor,
                response,
                preview_rows,
                ..
            }) => {
                assert_eq!(file.as_deref(), Some("run.csv"));
                assert!(no_plot);
                assert_eq!(predictor, "retention_time");
                assert_eq!(response, "intensity");
                assert_eq!(preview_rows, 5);
            }
            _ => panic!("expected process command"),
        }
    }

    #[test]
    fn test_global_data_dir() {
        let cli = Cli::try_parse_from(["chromapipe", "list", "--data-dir", "/tmp/runs"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/runs")));
    }
}
