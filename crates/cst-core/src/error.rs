//! Unified error types for the cst ecosystem
//!
//! This module provides a common error type [`CstError`] that can represent
//! errors from any part of the system. Degraded lookups (fallback table or
//! column selection) are deliberately *not* errors — they are reported
//! through [`crate::diagnostics::Diagnostics`] so a calculation can finish
//! with a best-effort result. Only conditions that make a calculation
//! impossible (dataset not loaded, dataset empty) interrupt the pipeline.

use thiserror::Error;

/// Unified error type for all cst operations.
#[derive(Error, Debug)]
pub enum CstError {
    /// The reference dataset has not been loaded yet; calculations must be
    /// refused rather than silently degraded.
    #[error("reference dataset not loaded")]
    NotReady,

    /// The reference dataset contains no tables of the required kind.
    #[error("reference dataset is empty: {0}")]
    EmptyDataset(String),

    /// I/O errors (dataset file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using CstError.
pub type CstResult<T> = Result<T, CstError>;

impl From<anyhow::Error> for CstError {
    fn from(err: anyhow::Error) -> Self {
        CstError::Other(err.to_string())
    }
}

impl From<String> for CstError {
    fn from(s: String) -> Self {
        CstError::Other(s)
    }
}

impl From<&str> for CstError {
    fn from(s: &str) -> Self {
        CstError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for CstError {
    fn from(err: serde_json::Error) -> Self {
        CstError::Parse(err.to_string())
    }
}
