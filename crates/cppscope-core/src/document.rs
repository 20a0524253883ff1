//! The per-file result document and its read-only queries.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    ClassEntity, DiagnosticEntity, EnumEntity, FunctionEntity, IncludeEntity, NamespaceEntity,
    VariableEntity,
};
use crate::enums::DiagnosticSeverity;
use crate::errors::CoreError;

/// Metadata key set to `true` when the file could not be analyzed.
pub const ANALYSIS_FAILED_KEY: &str = "analysis_failed";

/// Everything extracted from one translation unit.
///
/// Top-level lists hold declarations outside any namespace; namespaced
/// declarations live inside [`NamespaceEntity`] trees. The document owns the
/// whole tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FileDocument {
    pub file_path: String,
    pub includes: Vec<IncludeEntity>,
    pub namespaces: Vec<NamespaceEntity>,
    pub classes: Vec<ClassEntity>,
    pub functions: Vec<FunctionEntity>,
    pub variables: Vec<VariableEntity>,
    pub enums: Vec<EnumEntity>,
    pub diagnostics: Vec<DiagnosticEntity>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Counts derived from a [`FileDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DocumentStatistics {
    pub total_classes: usize,
    pub total_functions: usize,
    pub total_variables: usize,
    pub total_namespaces: usize,
    pub total_enums: usize,
    pub total_includes: usize,
    pub total_diagnostics: usize,
    /// Diagnostics of severity `error` or `fatal`.
    pub error_count: usize,
    pub warning_count: usize,
}

impl FileDocument {
    #[must_use]
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// A degraded document carrying a single analysis-failure diagnostic.
    #[must_use]
    pub fn failed(file_path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut doc = Self::new(file_path);
        doc.diagnostics
            .push(DiagnosticEntity::analysis_failure(&doc.file_path, message));
        doc.metadata
            .insert(ANALYSIS_FAILED_KEY.to_string(), serde_json::Value::Bool(true));
        doc
    }

    #[must_use]
    pub fn analysis_failed(&self) -> bool {
        self.metadata
            .get(ANALYSIS_FAILED_KEY)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    /// Every namespace in the document, depth first.
    pub fn all_namespaces(&self) -> impl Iterator<Item = &NamespaceEntity> {
        self.namespaces.iter().flat_map(NamespaceEntity::walk)
    }

    /// Every class in the document: top-level classes first, then classes in
    /// namespaces depth first, each class followed by its nested classes.
    pub fn all_classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.classes
            .iter()
            .chain(self.all_namespaces().flat_map(|ns| ns.classes.iter()))
            .flat_map(ClassEntity::walk)
    }

    /// Free functions at every level followed by every class's methods.
    pub fn all_functions(&self) -> impl Iterator<Item = &FunctionEntity> {
        self.functions
            .iter()
            .chain(self.all_namespaces().flat_map(|ns| ns.functions.iter()))
            .chain(self.all_classes().flat_map(|c| c.methods.iter()))
    }

    /// Top-level and namespace variables. Class fields are not included.
    pub fn all_variables(&self) -> impl Iterator<Item = &VariableEntity> {
        self.variables
            .iter()
            .chain(self.all_namespaces().flat_map(|ns| ns.variables.iter()))
    }

    /// Enums at every level, including those nested in classes.
    pub fn all_enums(&self) -> impl Iterator<Item = &EnumEntity> {
        self.enums
            .iter()
            .chain(self.all_namespaces().flat_map(|ns| ns.enums.iter()))
            .chain(self.all_classes().flat_map(|c| c.nested_enums.iter()))
    }

    /// Look up a namespace by its `::`-joined path.
    #[must_use]
    pub fn namespace(&self, path: &str) -> Option<&NamespaceEntity> {
        self.all_namespaces().find(|ns| ns.qualified_name() == path)
    }

    /// First class with the given name, in [`all_classes`](Self::all_classes) order.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassEntity> {
        self.all_classes().find(|c| c.name() == name)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_critical())
    }

    #[must_use]
    pub fn statistics(&self) -> DocumentStatistics {
        DocumentStatistics {
            total_classes: self.all_classes().count(),
            total_functions: self.all_functions().count(),
            total_variables: self.all_variables().count(),
            total_namespaces: self.all_namespaces().count(),
            total_enums: self.all_enums().count(),
            total_includes: self.includes.len(),
            total_diagnostics: self.diagnostics.len(),
            error_count: self
                .diagnostics
                .iter()
                .filter(|d| d.severity.is_critical())
                .count(),
            warning_count: self
                .diagnostics
                .iter()
                .filter(|d| d.severity == DiagnosticSeverity::Warning)
                .count(),
        }
    }

    /// Check the structural invariants of a finished document: every
    /// recorded entity is named and each namespace path occurs once.
    ///
    /// # Errors
    /// Returns [`CoreError::Validation`] naming the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut paths = BTreeSet::new();
        for namespace in self.all_namespaces() {
            let path = namespace.qualified_name();
            if namespace.name().is_empty() {
                return Err(unnamed("namespace", &namespace.element.location));
            }
            if !paths.insert(path.clone()) {
                return Err(CoreError::Validation(format!(
                    "namespace `{path}` is recorded more than once"
                )));
            }
        }
        if let Some(class) = self.all_classes().find(|c| c.name().is_empty()) {
            return Err(unnamed("class", &class.element.location));
        }
        if let Some(function) = self.all_functions().find(|f| f.name().is_empty()) {
            return Err(unnamed("function", &function.element.location));
        }
        let fields = self.all_classes().flat_map(|c| c.fields.iter());
        if let Some(variable) = self.all_variables().chain(fields).find(|v| v.name().is_empty()) {
            return Err(unnamed("variable", &variable.element.location));
        }
        if let Some(entity) = self.all_enums().find(|e| e.name().is_empty()) {
            return Err(unnamed("enum", &entity.element.location));
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`CoreError::Serialization`] when serde fails.
    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// # Errors
    /// Returns [`CoreError::Serialization`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn unnamed(what: &str, location: &crate::location::SourceLocation) -> CoreError {
    CoreError::Validation(format!("unnamed {what} recorded at {location}"))
}
