//! List command - show the CSV files in the data directory.

use std::path::Path;

use chromapipe::{Pipeline, PipelineConfig};
use colored::Colorize;

pub fn run(data_dir: &Path, sort: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::with_config(
        data_dir,
        PipelineConfig {
            sort_files: sort,
            ..PipelineConfig::default()
        },
    );

    let files = pipeline.list_data_files()?;

    if verbose {
        println!(
            "{} {}",
            "Data directory".cyan().bold(),
            data_dir.display().to_string().white()
        );
    }

    if files.is_empty() {
        println!("{} No CSV files found.", "Note:".yellow());
        return Ok(());
    }

    println!(
        "Found {} data file(s):",
        files.len().to_string().white().bold()
    );
    for file in &files {
        println!("  {} {}", "•".dimmed(), file);
    }

    Ok(())
}
