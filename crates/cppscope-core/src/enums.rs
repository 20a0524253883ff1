//! Element kinds, access specifiers, and diagnostic severities.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ElementKind
// ---------------------------------------------------------------------------

/// The declaration kind recorded on every [`CodeElement`](crate::entities::CodeElement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Class,
    Struct,
    Function,
    Method,
    Constructor,
    Destructor,
    Variable,
    Field,
    Namespace,
    Enum,
    EnumConstant,
    Template,
    Typedef,
    Using,
    Unknown,
}

impl ElementKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Function => "function",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Destructor => "destructor",
            Self::Variable => "variable",
            Self::Field => "field",
            Self::Namespace => "namespace",
            Self::Enum => "enum",
            Self::EnumConstant => "enum_constant",
            Self::Template => "template",
            Self::Typedef => "typedef",
            Self::Using => "using",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this kind is a member function of some class.
    #[must_use]
    pub const fn is_member_function(self) -> bool {
        matches!(self, Self::Method | Self::Constructor | Self::Destructor)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AccessSpecifier
// ---------------------------------------------------------------------------

/// Member access as reported by the front end.
///
/// Declarations outside any class report `Unknown` unless the front end says
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessSpecifier {
    Public,
    Private,
    Protected,
    #[default]
    Unknown,
}

impl AccessSpecifier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AccessSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DiagnosticSeverity
// ---------------------------------------------------------------------------

/// Severity of a front-end diagnostic.
///
/// Variants are declared in increasing order so that `Ord` gives
/// `ignored < note < warning < error < fatal`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Ignored,
    Note,
    Warning,
    Error,
    Fatal,
}

impl DiagnosticSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// `true` for `error` and `fatal`. A unit with such a diagnostic is not
    /// traversed.
    #[must_use]
    pub fn is_critical(self) -> bool {
        self >= Self::Error
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
