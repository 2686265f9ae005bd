//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the in-memory dataset (`Table`, `Column`, `DType`)
//! - run configuration (`AnalysisConfig`)
//! - the column names the analysis looks for (`columns`)

pub mod columns;
pub mod types;

pub use types::*;

/// Dataset location used when no `--input` is given.
pub const DEFAULT_INPUT: &str = "datasets/used_car_dataset.csv";

/// Dashboard image written when no `--output` is given.
pub const DEFAULT_OUTPUT: &str = "eda_visualizations.svg";
