//! Error types for vtpview

use thiserror::Error;

/// Main error type for vtpview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load dataset: {0}")]
    Load(String),

    #[error("no point-data field named '{name}'")]
    FieldNotFound { name: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("no usable display: {0}")]
    DisplayUnavailable(String),

    #[error("render error: {0}")]
    Render(String),
}

/// Result type alias for vtpview operations
pub type Result<T> = std::result::Result<T, Error>;
