//! Error types for Ledgergrid core.

use thiserror::Error;

/// Errors that can occur at the document boundary.
///
/// Formula failures are not listed here: they are absorbed by the
/// recompute pass and leave the cell at `0`.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("Invalid address key in grid snapshot: {0}")]
    SnapshotKey(String),

    #[error("No file path set")]
    NoFilePath,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
