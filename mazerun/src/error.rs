//! Error types for mazerun.

use thiserror::Error;

/// Mazerun error type.
///
/// Only configuration problems are fatal to a batch; a search that finds
/// no path is a normal unsuccessful result, not an error.
#[derive(Error, Debug)]
pub enum MazerunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid task {index}: {reason}")]
    InvalidTask { index: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for MazerunError {
    fn from(e: toml::de::Error) -> Self {
        MazerunError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MazerunError>;
