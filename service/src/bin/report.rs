//! Load one catalog file and print the analysis report.
//!
//! Usage: report <path-to-csv>

use catalog::{AnalysisReport, DatasetLoader};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PATH: &str = "steam_games.csv";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "report=info,catalog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_PATH.to_string());

    let load = match DatasetLoader::new().load(&path) {
        Ok(load) => load,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !load.warnings.is_empty() {
        tracing::info!(
            "{} warnings while loading {} ({} rows skipped)",
            load.warnings.len(),
            path,
            load.rejected_rows()
        );
    }

    println!();
    print!("{}", AnalysisReport::from_load(&load));
    println!();

    ExitCode::SUCCESS
}
