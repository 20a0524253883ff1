//! Multi-file results and summary counters.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::FileDocument;

/// A file that produced no document at all (for example, it did not exist).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileFailure {
    pub file_path: String,
    pub reason: String,
}

/// Summary counters over every document of a project run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProjectStatistics {
    pub total_files: usize,
    pub total_classes: usize,
    pub total_functions: usize,
    pub total_variables: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub files_with_errors: usize,
}

impl ProjectStatistics {
    /// Sum the per-document statistics of `results`.
    #[must_use]
    pub fn from_documents(results: &[FileDocument]) -> Self {
        results.iter().fold(
            Self {
                total_files: results.len(),
                ..Self::default()
            },
            |mut acc, doc| {
                let stats = doc.statistics();
                acc.total_classes += stats.total_classes;
                acc.total_functions += stats.total_functions;
                acc.total_variables += stats.total_variables;
                acc.total_errors += stats.error_count;
                acc.total_warnings += stats.warning_count;
                if stats.error_count > 0 {
                    acc.files_with_errors += 1;
                }
                acc
            },
        )
    }
}

/// One document per analyzed file plus project-wide counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectDocument {
    pub project_path: String,
    pub files_analyzed: usize,
    /// In input order.
    pub results: Vec<FileDocument>,
    pub failures: Vec<FileFailure>,
    pub summary: ProjectStatistics,
    pub analyzed_at: DateTime<Utc>,
}

impl ProjectDocument {
    #[must_use]
    pub fn new(
        project_path: impl Into<String>,
        results: Vec<FileDocument>,
        failures: Vec<FileFailure>,
    ) -> Self {
        let summary = ProjectStatistics::from_documents(&results);
        Self {
            project_path: project_path.into(),
            files_analyzed: results.len(),
            results,
            failures,
            summary,
            analyzed_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn document(&self, file_path: &str) -> Option<&FileDocument> {
        self.results.iter().find(|d| d.file_path == file_path)
    }
}
