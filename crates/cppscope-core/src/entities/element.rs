use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ElementKind;
use crate::location::SourceLocation;

/// Header shared by every named declaration.
///
/// `name` is never empty in a recorded entity: anonymous declarations are
/// skipped by the extractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CodeElement {
    pub name: String,
    pub kind: ElementKind,
    pub location: SourceLocation,
    pub display_name: String,
}

impl CodeElement {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: ElementKind,
        location: SourceLocation,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            location,
            display_name: display_name.into(),
        }
    }
}
