use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ClassEntity, CodeElement, EnumEntity, FunctionEntity, VariableEntity};
use crate::enums::ElementKind;
use crate::location::SourceLocation;

/// A namespace and everything declared directly inside it.
///
/// A namespace path identifies one instance per document: reopening the
/// namespace appends to the same lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NamespaceEntity {
    #[serde(flatten)]
    pub element: CodeElement,
    pub classes: Vec<ClassEntity>,
    pub functions: Vec<FunctionEntity>,
    pub variables: Vec<VariableEntity>,
    pub enums: Vec<EnumEntity>,
    pub nested_namespaces: Vec<NamespaceEntity>,
    /// `::`-joined path of the enclosing namespaces, `None` at top level.
    pub parent_namespace_path: Option<String>,
}

impl NamespaceEntity {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: SourceLocation,
        parent_namespace_path: Option<String>,
    ) -> Self {
        let name = name.into();
        Self {
            element: CodeElement::new(name.clone(), ElementKind::Namespace, location, name),
            classes: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
            enums: Vec::new(),
            nested_namespaces: Vec::new(),
            parent_namespace_path,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.element.name
    }

    /// Fully qualified `::`-joined path of this namespace.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.parent_namespace_path {
            Some(parent) => format!("{parent}::{}", self.element.name),
            None => self.element.name.clone(),
        }
    }

    /// This namespace followed by its nested namespaces, depth first.
    pub fn walk(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        Box::new(std::iter::once(self).chain(self.nested_namespaces.iter().flat_map(Self::walk)))
    }
}
