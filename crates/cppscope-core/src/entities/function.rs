use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::CodeElement;
use crate::enums::AccessSpecifier;

/// One formal parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterEntity {
    /// `param_<index>` when the declaration leaves the parameter unnamed.
    pub name: String,
    pub type_name: String,
    pub is_const: bool,
    pub is_reference: bool,
    pub is_pointer: bool,
    pub default_value: Option<String>,
}

/// A free function, method, constructor, or destructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FunctionEntity {
    #[serde(flatten)]
    pub element: CodeElement,
    pub return_type_name: String,
    pub parameters: Vec<ParameterEntity>,
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_static: bool,
    pub is_const: bool,
    pub is_constructor: bool,
    pub is_destructor: bool,
    pub is_template: bool,
    pub access_specifier: AccessSpecifier,
    /// `::`-joined class path of the owner, `None` for free functions.
    pub owning_class_qualified_name: Option<String>,
}

impl FunctionEntity {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.element.name
    }

    /// `return_type name(type, type)` in the usual C++ spelling.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self.parameters.iter().map(|p| p.type_name.as_str()).collect();
        let mut sig = if self.return_type_name.is_empty() {
            format!("{}({})", self.element.name, params.join(", "))
        } else {
            format!(
                "{} {}({})",
                self.return_type_name,
                self.element.name,
                params.join(", ")
            )
        };
        if self.is_const {
            sig.push_str(" const");
        }
        if self.is_pure_virtual {
            sig.push_str(" = 0");
        }
        sig
    }
}
