//! Cleaning stage: derive numeric columns from free-text listing fields.
//!
//! - field parsers (`normalize`)
//! - the table-level stage that applies them (`stage`)

pub mod normalize;
pub mod stage;

pub use normalize::*;
pub use stage::*;
