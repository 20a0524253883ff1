//! Cross-cutting error types for cppscope.
//!
//! Front-end, aggregation, and analysis errors live in `cppscope-parser`;
//! configuration errors live in `cppscope-config`. Everything converges on
//! `anyhow` in the CLI.

use thiserror::Error;

/// Errors that can be raised while building or inspecting documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A document or entity failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A document could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
