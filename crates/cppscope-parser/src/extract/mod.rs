//! Per-kind extractors.
//!
//! Each extractor reads one cursor and returns the matching entity, or `None`
//! when the declaration is anonymous. Scope-derived fields come from the
//! [`ExtractContext`]. A front end that cannot answer a read costs only that
//! field: the extractor substitutes an empty or default value, logs at debug
//! level, and carries on.

mod class;
mod enumeration;
mod function;
mod include;
mod namespace;
mod variable;

pub use class::extract_class;
pub use enumeration::extract_enum;
pub use function::{extract_function, extract_parameters};
pub use include::extract_include;
pub use namespace::extract_namespace;
pub use variable::extract_variable;

use cppscope_core::entities::CodeElement;
use cppscope_core::enums::ElementKind;
use cppscope_core::location::SourceLocation;

use crate::cursor::{Cursor, TypeInfo};
use crate::error::FrontendError;
use crate::scope::ScopeTracker;

/// Position-dependent inputs shared by all extractors.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    /// Path of the document being built, used for placeholder locations.
    pub file_path: &'a str,
    pub scope: &'a ScopeTracker,
}

impl<'a> ExtractContext<'a> {
    #[must_use]
    pub const fn new(file_path: &'a str, scope: &'a ScopeTracker) -> Self {
        Self { file_path, scope }
    }
}

/// The cursor's location, or `file:0:0` when the front end has none.
pub(crate) fn location_or_unknown<C: Cursor>(cursor: &C, ctx: ExtractContext<'_>) -> SourceLocation {
    cursor.location().unwrap_or_else(|error| {
        tracing::debug!(%error, "using placeholder location");
        SourceLocation::unknown(ctx.file_path)
    })
}

/// An empty type when the front end cannot resolve one.
pub(crate) fn type_or_default(read: Result<TypeInfo, FrontendError>) -> TypeInfo {
    read.unwrap_or_else(|error| {
        tracing::debug!(%error, "using empty type");
        TypeInfo::default()
    })
}

/// Common header, or `None` for an anonymous declaration.
pub(crate) fn element<C: Cursor>(
    cursor: &C,
    kind: ElementKind,
    ctx: ExtractContext<'_>,
) -> Option<CodeElement> {
    let name = cursor.spelling();
    if name.is_empty() {
        tracing::debug!(cursor_kind = %cursor.kind(), "skipping anonymous declaration");
        return None;
    }
    Some(CodeElement::new(
        name,
        kind,
        location_or_unknown(cursor, ctx),
        cursor.display_name(),
    ))
}
