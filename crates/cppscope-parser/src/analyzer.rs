//! Per-file analysis: front end, then aggregation, then metadata.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use cppscope_config::AnalysisConfig;
use cppscope_core::document::FileDocument;
use serde_json::Value;

use crate::aggregate::TreeAggregator;
use crate::ast::AstNode;
use crate::cursor::ParsedUnit;
use crate::error::{AnalysisError, FrontendError};
use crate::frontend::{Frontend, frontend_for};

/// Analyzes files with one configuration and one front end.
///
/// Shared by reference across the project worker pool.
pub struct Analyzer {
    config: AnalysisConfig,
    frontend: Box<dyn Frontend>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .field("frontend", &self.frontend.name())
            .finish()
    }
}

impl Analyzer {
    #[must_use]
    pub fn new(config: AnalysisConfig, frontend: Box<dyn Frontend>) -> Self {
        Self { config, frontend }
    }

    /// Build an analyzer with the front end named in `config`.
    ///
    /// # Errors
    /// Returns [`AnalysisError::Config`] for invalid settings and
    /// [`AnalysisError::Frontend`] when the front end is not available.
    pub fn from_config(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let frontend = frontend_for(config.frontend)?;
        Ok(Self::new(config, frontend))
    }

    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    #[must_use]
    pub fn frontend_name(&self) -> &'static str {
        self.frontend.name()
    }

    /// Analyze one file on disk.
    ///
    /// Parse and traversal failures do not fail the call: they produce a
    /// document flagged with `analysis_failed`.
    ///
    /// # Errors
    /// Returns [`AnalysisError::FileNotFound`] when `path` is not a file.
    pub fn analyze_file(&self, path: &Path) -> Result<FileDocument, AnalysisError> {
        if !path.is_file() {
            return Err(AnalysisError::FileNotFound(path.to_path_buf()));
        }
        let file_path = path.to_string_lossy().into_owned();
        let args = self.config.compiler_args(path);
        let parsed = self.frontend.parse(path, &args);
        Ok(self.finish(&file_path, &args, parsed))
    }

    /// Analyze in-memory source as if it were the file at `path`.
    #[must_use]
    pub fn analyze_source(&self, path: &str, source: &str) -> FileDocument {
        let args = self.config.compiler_args(Path::new(path));
        let parsed = self.frontend.parse_source(path, source, &args);
        self.finish(path, &args, parsed)
    }

    fn finish(
        &self,
        file_path: &str,
        args: &[String],
        parsed: Result<ParsedUnit<AstNode>, FrontendError>,
    ) -> FileDocument {
        let metadata = self.metadata(args);
        let document = match parsed {
            Ok(unit) => assemble_document(file_path, unit, metadata, self.config.max_depth),
            Err(error) => {
                tracing::error!(file = file_path, %error, "front end failed");
                failed_document(file_path, &error.to_string(), metadata)
            }
        };
        tracing::info!(
            file = file_path,
            classes = document.classes.len(),
            namespaces = document.namespaces.len(),
            diagnostics = document.diagnostics.len(),
            failed = document.analysis_failed(),
            "analysis complete"
        );
        document
    }

    fn metadata(&self, args: &[String]) -> BTreeMap<String, Value> {
        BTreeMap::from([
            (
                "cpp_standard".to_string(),
                Value::from(self.config.cpp_standard.clone()),
            ),
            ("analysis_time".to_string(), Value::from(Utc::now().to_rfc3339())),
            ("compiler_args".to_string(), Value::from(args.to_vec())),
            ("frontend".to_string(), Value::from(self.frontend.name())),
        ])
    }
}

/// Turn a parsed unit into a document.
///
/// Diagnostics are always copied. A critical diagnostic skips the traversal
/// and leaves a diagnostics-only document; otherwise the tree is aggregated
/// and the entity totals are added to `metadata`.
#[must_use]
pub fn assemble_document(
    file_path: &str,
    unit: ParsedUnit<AstNode>,
    metadata: BTreeMap<String, Value>,
    max_depth: usize,
) -> FileDocument {
    let mut document = FileDocument::new(file_path);
    document.metadata = metadata;

    let critical = unit.has_critical_diagnostics();
    document.diagnostics = unit.diagnostics;
    if critical {
        tracing::warn!(
            file = file_path,
            diagnostics = document.diagnostics.len(),
            "critical diagnostics, skipping traversal"
        );
        return document;
    }

    let metadata = document.metadata.clone();
    match TreeAggregator::with_document(document, max_depth).run(&unit.root) {
        Ok(mut document) => {
            let stats = document.statistics();
            for (key, total) in [
                ("total_classes", stats.total_classes),
                ("total_functions", stats.total_functions),
                ("total_variables", stats.total_variables),
                ("total_namespaces", stats.total_namespaces),
            ] {
                document.metadata.insert(key.to_string(), Value::from(total));
            }
            if let Err(error) = document.validate() {
                tracing::warn!(file = file_path, %error, "document failed validation");
            }
            document
        }
        Err(error) => {
            tracing::error!(file = file_path, %error, "traversal aborted");
            failed_document(file_path, &error.to_string(), metadata)
        }
    }
}

fn failed_document(file_path: &str, message: &str, metadata: BTreeMap<String, Value>) -> FileDocument {
    let mut document = FileDocument::failed(file_path, message);
    for (key, value) in metadata {
        document.metadata.entry(key).or_insert(value);
    }
    document
}
