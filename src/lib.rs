//! `used-car-eda` library crate.
//!
//! The binary (`eda`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - stats and report formatting can be reused on other tables

pub mod app;
pub mod clean;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod stats;
