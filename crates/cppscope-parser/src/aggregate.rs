//! Single-pass recursive walk from a cursor tree to a nested document.

use cppscope_core::document::FileDocument;

use crate::cursor::{Cursor, CursorKind};
use crate::error::AggregateError;
use crate::extract::{
    ExtractContext, extract_class, extract_enum, extract_function, extract_include,
    extract_namespace, extract_variable,
};
use crate::placement;
use crate::scope::ScopeTracker;

/// Builds one [`FileDocument`] from one cursor tree.
///
/// The scope stacks are passed down the recursion explicitly; the aggregator
/// itself only owns the document under construction.
#[derive(Debug)]
pub struct TreeAggregator {
    file_path: String,
    document: FileDocument,
    max_depth: usize,
}

impl TreeAggregator {
    #[must_use]
    pub fn new(file_path: impl Into<String>, max_depth: usize) -> Self {
        Self::with_document(FileDocument::new(file_path), max_depth)
    }

    /// Continue filling an existing document, for example one that already
    /// carries diagnostics and metadata.
    #[must_use]
    pub fn with_document(document: FileDocument, max_depth: usize) -> Self {
        Self {
            file_path: document.file_path.clone(),
            document,
            max_depth,
        }
    }

    /// Walk `root` with fresh scope stacks and return the finished document.
    ///
    /// # Errors
    /// Returns [`AggregateError::DepthExceeded`] when the tree is deeper than
    /// the configured limit. Per-node placement failures are logged and do not
    /// fail the run.
    pub fn run<C: Cursor>(mut self, root: &C) -> Result<FileDocument, AggregateError> {
        let mut scope = ScopeTracker::new();
        self.visit(root, 0, &mut scope)?;
        Ok(self.document)
    }

    /// Visit one cursor and, unless it opened a scope of its own, its
    /// children.
    ///
    /// # Errors
    /// Returns [`AggregateError::DepthExceeded`] past the depth limit.
    pub fn visit<C: Cursor>(
        &mut self,
        cursor: &C,
        depth: usize,
        scope: &mut ScopeTracker,
    ) -> Result<(), AggregateError> {
        if depth > self.max_depth {
            return Err(AggregateError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        let kind = cursor.kind();
        if kind != CursorKind::InclusionDirective && !self.is_from_document_file(cursor) {
            return Ok(());
        }

        match kind {
            CursorKind::Namespace => {
                let ctx = ExtractContext::new(&self.file_path, scope);
                if let Some(namespace) = extract_namespace(cursor, ctx) {
                    let name = namespace.name().to_string();
                    placement::declare_namespace(&mut self.document, scope, namespace);
                    scope.enter_namespace(name);
                    let result = self.visit_children(cursor, depth, scope);
                    scope.leave_namespace();
                    return result;
                }
                // Anonymous namespace: its subtree is not recorded.
                return Ok(());
            }
            CursorKind::ClassDecl | CursorKind::StructDecl | CursorKind::ClassTemplate => {
                let ctx = ExtractContext::new(&self.file_path, scope);
                if let Some(class) = extract_class(cursor, ctx) {
                    let name = class.name().to_string();
                    match placement::declare_class(&mut self.document, scope, class) {
                        Ok(()) => {
                            scope.enter_class(name);
                            let result = self.visit_children(cursor, depth, scope);
                            scope.leave_class();
                            return result;
                        }
                        Err(error) => {
                            tracing::warn!(%error, class = %name, "class dropped");
                        }
                    }
                }
                // Anonymous or dropped class: its members have no owner.
                return Ok(());
            }
            CursorKind::FunctionDecl
            | CursorKind::FunctionTemplate
            | CursorKind::Method
            | CursorKind::Constructor
            | CursorKind::Destructor => {
                let ctx = ExtractContext::new(&self.file_path, scope);
                if let Some(function) = extract_function(cursor, ctx) {
                    let name = function.element.name.clone();
                    if let Err(error) = placement::place_function(&mut self.document, scope, function) {
                        tracing::warn!(%error, function = %name, "function dropped");
                    }
                }
            }
            CursorKind::VarDecl | CursorKind::FieldDecl => {
                let ctx = ExtractContext::new(&self.file_path, scope);
                if let Some(variable) = extract_variable(cursor, ctx) {
                    let name = variable.element.name.clone();
                    if let Err(error) = placement::place_variable(&mut self.document, scope, variable) {
                        tracing::warn!(%error, variable = %name, "variable dropped");
                    }
                }
            }
            CursorKind::EnumDecl => {
                let ctx = ExtractContext::new(&self.file_path, scope);
                if let Some(entity) = extract_enum(cursor, ctx) {
                    let name = entity.element.name.clone();
                    if let Err(error) = placement::place_enum(&mut self.document, scope, entity) {
                        tracing::warn!(%error, enum_name = %name, "enum dropped");
                    }
                }
            }
            CursorKind::InclusionDirective => {
                let ctx = ExtractContext::new(&self.file_path, scope);
                if let Some(include) = extract_include(cursor, ctx) {
                    self.document.includes.push(include);
                }
            }
            CursorKind::TranslationUnit
            | CursorKind::EnumConstantDecl
            | CursorKind::ParmDecl
            | CursorKind::BaseSpecifier
            | CursorKind::Other => {}
        }

        self.visit_children(cursor, depth, scope)
    }

    fn visit_children<C: Cursor>(
        &mut self,
        cursor: &C,
        depth: usize,
        scope: &mut ScopeTracker,
    ) -> Result<(), AggregateError> {
        for child in cursor.children().iter() {
            self.visit(child, depth + 1, scope)?;
        }
        Ok(())
    }

    /// Nodes without a location (the root) pass.
    fn is_from_document_file<C: Cursor>(&self, cursor: &C) -> bool {
        cursor
            .location()
            .ok()
            .is_none_or(|location| location.file_path == self.file_path)
    }
}
