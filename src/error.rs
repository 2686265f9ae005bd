//! Application error type.
//!
//! Every stage returns `Result<_, AppError>`. The binary maps each kind to an
//! exit code:
//!
//! - `2` input problems (missing file, undecodable CSV)
//! - `3` analysis failures
//! - `4` I/O and rendering failures

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The dataset file does not exist.
    #[error("Dataset file '{}' not found!", .path.display())]
    InputMissing { path: PathBuf },

    #[error("Failed to read CSV '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render visualizations: {0}")]
    Render(String),

    #[error("Error occurred during analysis: {0}")]
    Analysis(String),
}

impl AppError {
    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    pub fn render(msg: impl std::fmt::Display) -> Self {
        Self::Render(msg.to_string())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputMissing { .. } | Self::Csv { .. } => 2,
            Self::Analysis(_) => 3,
            Self::Io(_) | Self::Render(_) => 4,
        }
    }

    /// Extra guidance printed under the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InputMissing { .. } => Some("Please ensure the dataset is in the correct location."),
            _ => None,
        }
    }
}
