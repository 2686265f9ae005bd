//! Statistical building blocks: descriptive summaries, correlation, and
//! frequency/grouping helpers.

pub mod correlation;
pub mod describe;
pub mod frequency;

pub use correlation::*;
pub use describe::*;
pub use frequency::*;
