//! Example: Process every CSV file in a directory and print a short report.
//!
//! Usage:
//!   cargo run --example report -- <data_dir>
//!
//! Example:
//!   cargo run --example report -- data

use std::env;
use std::path::Path;

use chromapipe::{Pipeline, PipelineConfig};

fn main() -> chromapipe::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example report -- <data_dir>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example report -- data");
        std::process::exit(1);
    }

    let data_dir = Path::new(&args[1]);
    let pipeline = Pipeline::with_config(
        data_dir,
        PipelineConfig {
            sort_files: true,
            ..PipelineConfig::default()
        },
    );

    let separator = "=".repeat(80);

    for file in pipeline.list_data_files()? {
        let report = pipeline.process(&file, false)?;

        println!("{}", separator);
        println!("{}", report.filename);
        println!("{}", separator);
        println!("  Rows: {}", report.shape.0);
        println!("  Columns: {}", report.columns.join(", "));
        println!();

        println!("## Summary statistics");
        for (name, s) in report.summary_statistics.iter() {
            println!(
                "  {:20} count={:<6} mean={:<12.4} std={:<12.4} min={:<10.4} max={:.4}",
                name, s.count, s.mean, s.std, s.min, s.max
            );
        }
        println!();

        match &report.linear_regression {
            Some(fit) => println!(
                "## Regression: {} = {:.4} * {} + {:.4}  (R² = {:.4})",
                fit.response, fit.coefficient, fit.predictor, fit.intercept, fit.r2_score
            ),
            None => println!("## Regression: skipped"),
        }
        println!();
    }

    Ok(())
}
