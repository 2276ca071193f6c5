//! chromapipe CLI - chromatography/MS CSV pipeline.

mod cli;
mod commands;

use chromapipe::RegressionColumns;
use clap::Parser;
use cli::{Cli, Commands};
use commands::process::ProcessOptions;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(cli::default_data_dir);

    let result = match cli.command {
        None => commands::process::run_default(&data_dir, cli.verbose),

        Some(Commands::List { sort }) => commands::list::run(&data_dir, sort, cli.verbose),

        Some(Commands::Process {
            file,
            no_plot,
            json,
            predictor,
            response,
            no_regression,
            preview_rows,
            sort,
        }) => {
            let options = ProcessOptions {
                file,
                plot: !no_plot && cfg!(feature = "plot"),
                json,
                regression: (!no_regression).then(|| RegressionColumns::new(predictor, response)),
                preview_rows,
                sort,
            };
            commands::process::run(&data_dir, options, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug output with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
