//! Input helpers: CSV ingest + dtype inference (`ingest`).

pub mod ingest;

pub use ingest::*;
