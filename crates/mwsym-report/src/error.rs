//! Error types for mwsym-report.

use thiserror::Error;

/// Crate error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying file or stream error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A machine-generated input record did not have the expected shape.
    #[error("line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, Error>;
