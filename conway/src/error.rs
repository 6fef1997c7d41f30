// error.rs - Error types for the simulation engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

/// Every failure the engine reports. All of them are recoverable: the
/// controller leaves its grid and running status untouched when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("cell ({row}, {col}) is outside a {size}x{size} grid")]
    Index { row: usize, col: usize, size: usize },

    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
}

impl LifeError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        LifeError::Configuration(msg.into())
    }
}
