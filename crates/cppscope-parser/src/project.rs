//! Multi-file analysis over a rayon worker pool.

use std::path::{Path, PathBuf};

use cppscope_core::document::FileDocument;
use cppscope_core::project::{FileFailure, ProjectDocument};
use rayon::prelude::*;

use crate::analyzer::Analyzer;
use crate::error::AnalysisError;

impl Analyzer {
    /// Analyze `files` in parallel and collect one document per file.
    ///
    /// Every file gets its own scope tracker and document; nothing mutable is
    /// shared between workers. Results keep input order. Files that yield no
    /// document (missing, unreadable) are listed in `failures` instead of
    /// aborting the run.
    ///
    /// `workers == 0` uses rayon's default thread count.
    ///
    /// # Errors
    /// Returns [`AnalysisError::ThreadPool`] if the worker pool cannot start.
    pub fn analyze_project(
        &self,
        project_path: &Path,
        files: &[PathBuf],
        workers: usize,
    ) -> Result<ProjectDocument, AnalysisError> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        let outcomes: Vec<Result<FileDocument, AnalysisError>> =
            pool.install(|| files.par_iter().map(|f| self.analyze_file(f)).collect());

        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Ok(document) => results.push(document),
                Err(error) => {
                    tracing::warn!(file = %file.display(), %error, "file skipped");
                    failures.push(FileFailure {
                        file_path: file.to_string_lossy().into_owned(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        let project = ProjectDocument::new(project_path.to_string_lossy(), results, failures);
        tracing::info!(
            project = %project_path.display(),
            files = project.files_analyzed,
            failures = project.failures.len(),
            classes = project.summary.total_classes,
            "project analysis complete"
        );
        Ok(project)
    }
}
