//! Front end backed by the system libclang.
//!
//! Function bodies are skipped at parse time. Nodes outside the main file
//! are pruned while lowering, except inclusion directives.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use clang::diagnostic::{Diagnostic, Severity};
use clang::{Accessibility, Clang, Entity, EntityKind, Index, StorageClass, TypeKind, Unsaved};
use cppscope_core::entities::DiagnosticEntity;
use cppscope_core::enums::{AccessSpecifier, DiagnosticSeverity};
use cppscope_core::location::SourceLocation;

use super::Frontend;
use crate::ast::{AstNode, MethodFlags};
use crate::cursor::{CursorKind, ParsedUnit, TypeInfo};
use crate::error::FrontendError;

/// libclang allows one `Clang` instance per process at a time.
static CLANG: Mutex<()> = Mutex::new(());

const CLANG_CATEGORY: &str = "Clang";

#[derive(Debug, Clone, Copy, Default)]
pub struct ClangFrontend;

impl ClangFrontend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn run(
        path: &str,
        source: Option<&str>,
        args: &[String],
    ) -> Result<ParsedUnit<AstNode>, FrontendError> {
        let _guard = CLANG.lock().unwrap_or_else(PoisonError::into_inner);
        let clang = Clang::new().map_err(FrontendError::Unavailable)?;
        let index = Index::new(&clang, false, false);

        let mut parser = index.parser(path);
        parser
            .arguments(args)
            .detailed_preprocessing_record(true)
            .skip_function_bodies(true);
        if let Some(source) = source {
            parser.unsaved(&[Unsaved::new(path, source)]);
        }
        let unit = parser.parse().map_err(|error| FrontendError::ParseFailed {
            path: path.to_string(),
            message: error.to_string(),
        })?;

        let lowering = Lowering { path };
        let diagnostics = unit
            .get_diagnostics()
            .iter()
            .map(|d| lowering.diagnostic(d))
            .collect();
        let children = unit
            .get_entity()
            .get_children()
            .iter()
            .filter_map(|child| lowering.node(child))
            .collect();
        Ok(ParsedUnit {
            root: AstNode::translation_unit(children),
            diagnostics,
        })
    }
}

impl Frontend for ClangFrontend {
    fn name(&self) -> &'static str {
        "libclang"
    }

    fn parse(&self, path: &Path, args: &[String]) -> Result<ParsedUnit<AstNode>, FrontendError> {
        Self::run(&path.to_string_lossy(), None, args)
    }

    fn parse_source(
        &self,
        path: &str,
        source: &str,
        args: &[String],
    ) -> Result<ParsedUnit<AstNode>, FrontendError> {
        Self::run(path, Some(source), args)
    }
}

struct Lowering<'p> {
    /// Path reported for main-file locations, as the caller spelled it.
    path: &'p str,
}

impl Lowering<'_> {
    fn location(&self, location: clang::source::SourceLocation<'_>) -> SourceLocation {
        let file_location = location.get_file_location();
        let file_path = if location.is_in_main_file() {
            self.path.to_string()
        } else {
            file_location
                .file
                .map(|f| f.get_path().display().to_string())
                .unwrap_or_default()
        };
        SourceLocation::new(
            file_path,
            file_location.line,
            file_location.column,
            file_location.offset,
        )
    }

    fn diagnostic(&self, diagnostic: &Diagnostic<'_>) -> DiagnosticEntity {
        let severity = match diagnostic.get_severity() {
            Severity::Ignored => DiagnosticSeverity::Ignored,
            Severity::Note => DiagnosticSeverity::Note,
            Severity::Warning => DiagnosticSeverity::Warning,
            Severity::Error => DiagnosticSeverity::Error,
            Severity::Fatal => DiagnosticSeverity::Fatal,
        };
        DiagnosticEntity {
            severity,
            message: diagnostic.get_text(),
            location: self.location(diagnostic.get_location()),
            category: CLANG_CATEGORY.to_string(),
        }
    }

    fn node(&self, entity: &Entity<'_>) -> Option<AstNode> {
        let entity_kind = entity.get_kind();
        let kind = cursor_kind(entity_kind);
        let location = entity.get_location();

        let in_main_file = location.is_some_and(|l| l.is_in_main_file());
        if kind != CursorKind::InclusionDirective && !in_main_file {
            return None;
        }
        // Unions are not modelled; their members must not leak into the
        // enclosing scope.
        if entity_kind == EntityKind::UnionDecl {
            return None;
        }
        if (kind.is_class_like() || kind == CursorKind::EnumDecl) && !entity.is_definition() {
            return None;
        }

        let mut node = AstNode::new(kind, entity.get_name().unwrap_or_default());
        if let Some(display_name) = entity.get_display_name() {
            node = node.with_display_name(display_name);
        }
        if let Some(location) = location {
            node = node.with_location(self.location(location));
        }
        if let Some(ty) = entity.get_type() {
            node = node.with_type(type_info(&ty));
        }
        node = node
            .with_access(access(entity.get_accessibility()))
            .with_static_storage(entity.get_storage_class() == Some(StorageClass::Static));

        match kind {
            _ if kind.is_function_like() => {
                if let Some(result) = entity.get_result_type() {
                    node = node.with_result_type(type_info(&result));
                }
                node = node.with_method_flags(MethodFlags {
                    is_virtual: entity.is_virtual_method(),
                    is_pure_virtual: entity.is_pure_virtual_method(),
                    is_static: entity.is_static_method(),
                    is_const: entity.is_const_method(),
                });
                let params = entity
                    .get_children()
                    .iter()
                    .filter(|c| c.get_kind() == EntityKind::ParmDecl)
                    .filter_map(|c| self.node(c))
                    .collect::<Vec<_>>();
                return Some(node.with_children(params));
            }
            CursorKind::EnumDecl => {
                node = node.with_scoped_enum(entity.is_scoped());
                if let Some(underlying) = entity.get_enum_underlying_type() {
                    node = node.with_enum_underlying_type(type_info(&underlying));
                }
            }
            CursorKind::EnumConstantDecl => {
                if let Some((signed, _)) = entity.get_enum_constant_value() {
                    node = node.with_enum_value(signed.to_string());
                }
            }
            CursorKind::VarDecl | CursorKind::FieldDecl | CursorKind::ParmDecl => {
                if let Some(initializer) = initializer(entity) {
                    node = node.with_initializer(initializer);
                }
            }
            CursorKind::InclusionDirective => {
                if let Some(file) = entity.get_file() {
                    node = node.with_included_file(file.get_path().display().to_string());
                }
                if let Some(directive) = directive_text(entity) {
                    node = node.with_display_name(directive);
                }
            }
            _ => {}
        }

        let children = entity
            .get_children()
            .iter()
            .filter_map(|child| self.node(child))
            .collect::<Vec<_>>();
        Some(node.with_children(children))
    }
}

fn cursor_kind(kind: EntityKind) -> CursorKind {
    match kind {
        EntityKind::TranslationUnit => CursorKind::TranslationUnit,
        EntityKind::Namespace => CursorKind::Namespace,
        EntityKind::ClassDecl => CursorKind::ClassDecl,
        EntityKind::StructDecl => CursorKind::StructDecl,
        EntityKind::ClassTemplate | EntityKind::ClassTemplatePartialSpecialization => {
            CursorKind::ClassTemplate
        }
        EntityKind::FunctionDecl => CursorKind::FunctionDecl,
        EntityKind::FunctionTemplate => CursorKind::FunctionTemplate,
        EntityKind::Method => CursorKind::Method,
        EntityKind::Constructor => CursorKind::Constructor,
        EntityKind::Destructor => CursorKind::Destructor,
        EntityKind::VarDecl => CursorKind::VarDecl,
        EntityKind::FieldDecl => CursorKind::FieldDecl,
        EntityKind::EnumDecl => CursorKind::EnumDecl,
        EntityKind::EnumConstantDecl => CursorKind::EnumConstantDecl,
        EntityKind::ParmDecl => CursorKind::ParmDecl,
        EntityKind::BaseSpecifier => CursorKind::BaseSpecifier,
        EntityKind::InclusionDirective => CursorKind::InclusionDirective,
        _ => CursorKind::Other,
    }
}

fn type_info(ty: &clang::Type<'_>) -> TypeInfo {
    let kind = ty.get_kind();
    TypeInfo {
        spelling: ty.get_display_name(),
        is_const: ty.is_const_qualified(),
        is_reference: kind == TypeKind::LValueReference,
        is_pointer: kind == TypeKind::Pointer,
    }
}

const fn access(accessibility: Option<Accessibility>) -> AccessSpecifier {
    match accessibility {
        Some(Accessibility::Public) => AccessSpecifier::Public,
        Some(Accessibility::Protected) => AccessSpecifier::Protected,
        Some(Accessibility::Private) => AccessSpecifier::Private,
        None => AccessSpecifier::Unknown,
    }
}

fn tokens(entity: &Entity<'_>) -> Vec<String> {
    entity
        .get_range()
        .map(|range| range.tokenize().iter().map(|t| t.get_spelling()).collect())
        .unwrap_or_default()
}

/// Tokens after the first top-level `=`.
fn initializer(entity: &Entity<'_>) -> Option<String> {
    let tokens = tokens(entity);
    let start = tokens.iter().position(|t| t == "=")?;
    let value = tokens[start + 1..].join(" ");
    (!value.is_empty()).then_some(value)
}

/// `#include <x>` or `#include "x"` rebuilt from tokens.
fn directive_text(entity: &Entity<'_>) -> Option<String> {
    let tokens = tokens(entity);
    let keyword = tokens.iter().position(|t| t == "include" || t == "import")?;
    let target: String = tokens[keyword + 1..].concat();
    Some(format!("#{} {target}", tokens[keyword]))
}
