//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the analysis pipeline against stdout

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::domain::AnalysisConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `eda` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may carry EDA_INPUT / EDA_OUTPUT / RUST_LOG.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = config_from_args(&cli);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline::run_analysis(&config, &mut out)?;
    Ok(())
}

pub fn config_from_args(args: &Cli) -> AnalysisConfig {
    AnalysisConfig {
        csv_path: args.input.clone(),
        output_path: args.output.clone(),
        sample_size: args.sample_size,
        seed: args.seed,
        top_n: args.top,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

/// Human-readable logs on stderr; stdout carries only the report.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, embedding) keeps the existing subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_plot_disables_rendering() {
        let cli = Cli::try_parse_from(["eda", "--no-plot", "--width", "800"]).unwrap();
        let config = config_from_args(&cli);
        assert!(!config.plot);
        assert_eq!(config.plot_width, 800);
        assert_eq!(config.plot_height, 1500);
    }
}
