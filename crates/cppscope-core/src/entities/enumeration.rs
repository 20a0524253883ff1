use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::CodeElement;
use crate::enums::AccessSpecifier;

/// One enumerator with the value the front end computed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumValue {
    pub name: String,
    pub value: String,
}

/// An enumeration, scoped (`enum class`) or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumEntity {
    #[serde(flatten)]
    pub element: CodeElement,
    pub is_scoped: bool,
    pub underlying_type_name: String,
    pub values: Vec<EnumValue>,
    pub access_specifier: AccessSpecifier,
}

impl EnumEntity {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.element.name
    }

    #[must_use]
    pub fn value_of(&self, enumerator: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.name == enumerator)
            .map(|v| v.value.as_str())
    }
}
