//! Command-line parsing for the used-car dataset analysis.
//!
//! Parsing stays here; `app` turns the parsed flags into an `AnalysisConfig`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{DEFAULT_INPUT, DEFAULT_OUTPUT};

/// Exploratory analysis of a used-car listings CSV.
#[derive(Debug, Parser, Clone)]
#[command(name = "eda", version, about = "Used-car listings exploratory data analysis")]
pub struct Cli {
    /// Dataset CSV to analyze.
    #[arg(short = 'i', long, env = "EDA_INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Dashboard image path (`.svg` writes SVG, anything else a bitmap).
    #[arg(short = 'o', long, env = "EDA_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Maximum number of points in the price vs mileage scatter.
    #[arg(long, default_value_t = 2000)]
    pub sample_size: usize,

    /// Random seed for the scatter sample.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Show top-N values per categorical column.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Dashboard width (pixels).
    #[arg(long, default_value_t = 2000)]
    pub width: u32,

    /// Dashboard height (pixels).
    #[arg(long, default_value_t = 1500)]
    pub height: u32,

    /// Skip the dashboard.
    #[arg(long)]
    pub no_plot: bool,
}
