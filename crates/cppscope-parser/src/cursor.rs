//! The read-only contract between a front end and the aggregator.
//!
//! A front end hands the aggregator a tree of [`Cursor`]s. Reads that the
//! front end may be unable to answer (location, types) return `Result` so the
//! extractors can substitute defaults for that one field and keep going.

use std::borrow::Cow;
use std::fmt;

use cppscope_core::entities::DiagnosticEntity;
use cppscope_core::enums::AccessSpecifier;
use cppscope_core::location::SourceLocation;

use crate::error::FrontendError;

/// Declaration kinds the aggregator distinguishes. Everything else is
/// [`CursorKind::Other`] and only recursed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    TranslationUnit,
    Namespace,
    ClassDecl,
    StructDecl,
    ClassTemplate,
    FunctionDecl,
    FunctionTemplate,
    Method,
    Constructor,
    Destructor,
    VarDecl,
    FieldDecl,
    EnumDecl,
    EnumConstantDecl,
    ParmDecl,
    BaseSpecifier,
    InclusionDirective,
    Other,
}

impl CursorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TranslationUnit => "translation_unit",
            Self::Namespace => "namespace",
            Self::ClassDecl => "class_decl",
            Self::StructDecl => "struct_decl",
            Self::ClassTemplate => "class_template",
            Self::FunctionDecl => "function_decl",
            Self::FunctionTemplate => "function_template",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Destructor => "destructor",
            Self::VarDecl => "var_decl",
            Self::FieldDecl => "field_decl",
            Self::EnumDecl => "enum_decl",
            Self::EnumConstantDecl => "enum_constant_decl",
            Self::ParmDecl => "parm_decl",
            Self::BaseSpecifier => "base_specifier",
            Self::InclusionDirective => "inclusion_directive",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub const fn is_class_like(self) -> bool {
        matches!(self, Self::ClassDecl | Self::StructDecl | Self::ClassTemplate)
    }

    #[must_use]
    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            Self::FunctionDecl
                | Self::FunctionTemplate
                | Self::Method
                | Self::Constructor
                | Self::Destructor
        )
    }
}

impl fmt::Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type as resolved by the front end.
///
/// The qualifier flags come from the front end, never from parsing
/// `spelling`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub spelling: String,
    pub is_const: bool,
    pub is_reference: bool,
    pub is_pointer: bool,
}

impl TypeInfo {
    #[must_use]
    pub fn named(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
            ..Self::default()
        }
    }
}

/// One node of a front end's syntax tree.
pub trait Cursor: Clone {
    fn kind(&self) -> CursorKind;

    /// Declared name. Empty for anonymous declarations.
    fn spelling(&self) -> String;

    fn display_name(&self) -> String;

    /// # Errors
    /// Returns [`FrontendError::Missing`] when the node has no position, as the
    /// translation-unit root does.
    fn location(&self) -> Result<SourceLocation, FrontendError>;

    /// Declared type of a variable, field, or parameter, or the type named by a
    /// base specifier.
    ///
    /// # Errors
    /// Returns [`FrontendError::Missing`] when the type cannot be resolved.
    fn type_info(&self) -> Result<TypeInfo, FrontendError>;

    /// # Errors
    /// Returns [`FrontendError::Missing`] when the node is not callable or its
    /// result type cannot be resolved.
    fn result_type(&self) -> Result<TypeInfo, FrontendError>;

    fn access(&self) -> AccessSpecifier;

    fn is_virtual_method(&self) -> bool;

    fn is_pure_virtual_method(&self) -> bool;

    fn is_static_method(&self) -> bool;

    fn is_const_method(&self) -> bool;

    /// `static` storage on a variable or data member.
    fn is_static_storage(&self) -> bool;

    fn is_scoped_enum(&self) -> bool;

    /// # Errors
    /// Returns [`FrontendError::Missing`] when the node is not an enum or the
    /// type cannot be resolved.
    fn enum_underlying_type(&self) -> Result<TypeInfo, FrontendError>;

    fn enum_constant_value(&self) -> Option<String>;

    /// Initializer text of a variable, or default argument of a parameter.
    fn initializer(&self) -> Option<String>;

    /// Resolved path of an inclusion directive's target.
    fn included_file(&self) -> Option<String>;

    fn children(&self) -> Cow<'_, [Self]>;
}

/// What a front end returns for one file.
#[derive(Debug, Clone)]
pub struct ParsedUnit<C> {
    pub root: C,
    pub diagnostics: Vec<DiagnosticEntity>,
}

impl<C> ParsedUnit<C> {
    /// Whether any diagnostic is severe enough to skip traversal.
    #[must_use]
    pub fn has_critical_diagnostics(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_critical())
    }
}
