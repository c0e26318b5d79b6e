//! Error types for Lineage operations.
//!
//! This module provides the main error type [`LineageError`]. Layout itself
//! never fails: malformed family data degrades gracefully. Errors come from
//! reading input, decoding it, loading configuration and exporting.

use std::io;

use thiserror::Error;

/// The main error type for Lineage operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the decoder error together with the source text,
/// so callers can point at the offending line and column.
#[derive(Debug, Error)]
pub enum LineageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for LineageError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl LineageError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
