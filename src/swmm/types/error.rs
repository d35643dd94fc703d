//! Custom error types for the swmm-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum SwmmError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The sentinel at byte offset 0 does not match the .out magic number.
    /// The file is not a SWMM results container, or its header is corrupt.
    #[error("Invalid .out file: magic number mismatch (expected {expected}, got {actual})")]
    MagicMismatch { expected: i32, actual: i32 },

    /// A read ran past end-of-file while strict decoding was requested.
    /// In the default tolerant mode short reads degrade to zero values
    /// instead of raising this error.
    #[error("Truncated file while reading {context}: needed {needed} bytes, {available} available")]
    Truncated {
        context: &'static str,
        needed: u64,
        available: u64,
    },

    /// An error while serializing decoded data to JSON.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// An error while writing decoded data to CSV tables.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// A convenience `Result` type alias using the crate's `SwmmError` type.
pub type Result<T> = std::result::Result<T, SwmmError>;
