use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DiagnosticSeverity;
use crate::location::SourceLocation;

/// A front-end diagnostic, or a synthetic one describing an analysis failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiagnosticEntity {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub location: SourceLocation,
    pub category: String,
}

impl DiagnosticEntity {
    /// Category used for diagnostics synthesized when analysis itself fails.
    pub const ANALYSIS_ERROR_CATEGORY: &'static str = "Analysis Error";

    /// An error-severity diagnostic at `path:0:0` describing why a file could
    /// not be analyzed.
    #[must_use]
    pub fn analysis_failure(file_path: &str, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            location: SourceLocation::unknown(file_path),
            category: Self::ANALYSIS_ERROR_CATEGORY.to_string(),
        }
    }
}
