use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::CodeElement;
use crate::enums::AccessSpecifier;

/// A variable or class field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VariableEntity {
    #[serde(flatten)]
    pub element: CodeElement,
    pub type_name: String,
    pub is_const: bool,
    pub is_static: bool,
    pub access_specifier: AccessSpecifier,
    pub initial_value: Option<String>,
}

impl VariableEntity {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.element.name
    }
}
