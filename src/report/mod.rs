//! Reporting: section summaries, narrative insights, and terminal formatting.
//!
//! Every function here reads the table and returns values or text; nothing
//! mutates the table.

pub mod format;
pub mod insights;
pub mod summary;

pub use format::*;
pub use insights::*;
pub use summary::*;
