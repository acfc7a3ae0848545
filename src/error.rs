// File: src/error.rs
use thiserror::Error;

/// Result type for dataset loading and persistence.
pub type Result<T> = std::result::Result<T, TrendsError>;

/// Failures that end a load attempt. Search, selection and permalink problems
/// degrade quietly instead and never show up here.
#[derive(Error, Debug)]
pub enum TrendsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A chunk that is not JSON or breaks the name/gender/year schema.
    #[error("Malformed chunk {source_name}: {reason}")]
    MalformedChunk { source_name: String, reason: String },

    #[error("Invalid manifest: {0}")]
    Manifest(String),

    #[error("Invalid config file: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}
