//! Error types for parsing, aggregation, and analysis.

use std::path::PathBuf;

use cppscope_config::ConfigError;

/// Errors raised by a front end or by reading a cursor.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("Parse failed for {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Front end not available: {0}")]
    Unavailable(String),

    /// A cursor does not carry the requested piece of information.
    #[error("{cursor} has no {what}")]
    Missing { what: &'static str, cursor: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures inside a single traversal.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// The cursor tree is deeper than the configured limit. Aborts the run.
    #[error("Traversal exceeded the depth limit of {limit}")]
    DepthExceeded { limit: usize },

    /// A member's owning class is not in the document. Only that member is
    /// dropped.
    #[error("Class '{name}' not found in namespace '{namespace}'")]
    ClassNotFound { name: String, namespace: String },
}

/// Errors returned by the analysis entry points.
///
/// Parse and traversal failures are not errors here: they degrade the
/// document instead.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
