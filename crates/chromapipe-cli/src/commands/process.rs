//! Process command - run the pipeline on one file and print the report.

use std::path::Path;

use chromapipe::{Column, Pipeline, PipelineConfig, ProcessReport, RegressionColumns, Table};
use colored::Colorize;

/// Options collected from the `process` subcommand.
pub struct ProcessOptions {
    pub file: Option<String>,
    pub plot: bool,
    pub json: bool,
    pub regression: Option<RegressionColumns>,
    pub preview_rows: usize,
    pub sort: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            file: None,
            plot: cfg!(feature = "plot"),
            json: false,
            regression: Some(RegressionColumns::default()),
            preview_rows: 5,
            sort: false,
        }
    }
}

/// No subcommand: list the files, then process the first one with the plot.
pub fn run_default(data_dir: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new(data_dir);
    let files = pipeline.list_data_files()?;

    println!("{} {:?}", "Found data files:".cyan().bold(), files);

    let Some(first) = files.into_iter().next() else {
        return Ok(());
    };

    let options = ProcessOptions {
        file: Some(first),
        ..ProcessOptions::default()
    };
    run(data_dir, options, verbose)
}

pub fn run(
    data_dir: &Path,
    options: ProcessOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::with_config(
        data_dir,
        PipelineConfig {
            regression: options.regression,
            preview_rows: options.preview_rows,
            sort_files: options.sort,
            ..PipelineConfig::default()
        },
    );

    let file = match options.file {
        Some(file) => file,
        None => pipeline
            .list_data_files()?
            .into_iter()
            .next()
            .ok_or_else(|| format!("No CSV files found in {}", data_dir.display()))?,
    };

    if !options.json {
        println!(
            "{} {}",
            "Processing".cyan().bold(),
            data_dir.join(&file).display().to_string().white()
        );
    }

    let report = pipeline.process(&file, options.plot)?;

    if options.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_report(&report, verbose);
    }

    Ok(())
}

fn print_report(report: &ProcessReport, verbose: bool) {
    println!(
        "Shape: {} rows x {} columns",
        report.shape.0.to_string().white().bold(),
        report.shape.1.to_string().white().bold()
    );
    println!("Columns: {}", report.columns.join(", "));

    if verbose {
        println!(
            "Source: {} ({} bytes, {})",
            report.source.path.display(),
            report.source.size_bytes,
            report.source.hash
        );
    }

    println!();
    println!("{}", "Head:".yellow().bold());
    print_table(&report.head);

    println!();
    println!("{}", "Normalized head:".yellow().bold());
    print_table(&report.normalized_head);

    println!();
    println!("{}", "Summary statistics:".yellow().bold());
    if report.summary_statistics.is_empty() {
        println!("  (no numeric columns)");
    } else {
        println!(
            "  {:20} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        );
        for (name, s) in report.summary_statistics.iter() {
            println!(
                "  {:20} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                name, s.count, s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max
            );
        }
    }

    println!();
    match &report.linear_regression {
        Some(fit) => {
            println!("{}", "Linear regression:".yellow().bold());
            println!(
                "  {} = {:.6} * {} + {:.6}",
                fit.response, fit.coefficient, fit.predictor, fit.intercept
            );
            println!("  R² = {}", format!("{:.6}", fit.r2_score).green());
        }
        None => println!(
            "{} regression columns not present, skipped",
            "Linear regression:".yellow().bold()
        ),
    }
}

fn print_table(table: &Table) {
    let names = table.column_names();
    let header: Vec<String> = names.iter().map(|name| format!("{:>14}", name)).collect();
    println!("  {}", header.join(" ").dimmed());

    for row in 0..table.row_count() {
        let cells: Vec<String> = table
            .columns()
            .map(|(_, column)| format!("{:>14}", format_cell(column, row)))
            .collect();
        println!("  {}", cells.join(" "));
    }
}

fn format_cell(column: &Column, row: usize) -> String {
    match column {
        Column::Numeric(values) => match values.get(row) {
            Some(v) if v.is_nan() => "NaN".to_string(),
            Some(v) => format!("{:.4}", v),
            None => String::new(),
        },
        Column::Text(values) => match values.get(row) {
            Some(Some(s)) => s.clone(),
            Some(None) => "NA".to_string(),
            None => String::new(),
        },
    }
}
