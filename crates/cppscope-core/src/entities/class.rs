use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CodeElement, EnumEntity, FunctionEntity, VariableEntity};
use crate::enums::{AccessSpecifier, ElementKind};
use crate::location::SourceLocation;

/// A class or struct, with its members attached in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassEntity {
    #[serde(flatten)]
    pub element: CodeElement,
    pub base_class_names: Vec<String>,
    /// Set only when the class itself declares a pure virtual method.
    pub is_abstract: bool,
    pub is_template: bool,
    /// `::`-joined path of the enclosing namespaces.
    pub owning_namespace_path: Option<String>,
    pub access_specifier: AccessSpecifier,
    pub methods: Vec<FunctionEntity>,
    pub fields: Vec<VariableEntity>,
    pub nested_enums: Vec<EnumEntity>,
    pub nested_classes: Vec<ClassEntity>,
}

impl ClassEntity {
    /// An empty class with no bases or members.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ElementKind, location: SourceLocation) -> Self {
        let name = name.into();
        Self {
            element: CodeElement::new(name.clone(), kind, location, name),
            base_class_names: Vec::new(),
            is_abstract: false,
            is_template: false,
            owning_namespace_path: None,
            access_specifier: AccessSpecifier::Unknown,
            methods: Vec::new(),
            fields: Vec::new(),
            nested_enums: Vec::new(),
            nested_classes: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.element.name
    }

    /// Fold a later declaration of the same class into this one.
    ///
    /// Unseen base names are appended, the abstract and template flags are
    /// OR-ed, and the first location is kept. Members are never copied: they
    /// are attached by the traversal.
    pub fn merge_declaration(&mut self, other: &Self) {
        for base in &other.base_class_names {
            if !self.base_class_names.contains(base) {
                self.base_class_names.push(base.clone());
            }
        }
        self.is_abstract |= other.is_abstract;
        self.is_template |= other.is_template;
        if self.element.location.is_unknown() && !other.element.location.is_unknown() {
            self.element.location = other.element.location.clone();
        }
    }

    /// This class followed by its nested classes, depth first.
    pub fn walk(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        Box::new(std::iter::once(self).chain(self.nested_classes.iter().flat_map(Self::walk)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn class(name: &str) -> ClassEntity {
        ClassEntity::new(name, ElementKind::Class, SourceLocation::new("a.cpp", 1, 1, 0))
    }

    #[test]
    fn merge_appends_new_bases_and_ors_flags() {
        let mut first = class("C");
        first.base_class_names.push("A".into());

        let mut second = class("C");
        second.base_class_names = vec!["A".into(), "B".into()];
        second.is_abstract = true;
        second.element.location = SourceLocation::new("a.cpp", 9, 1, 80);

        first.merge_declaration(&second);

        assert_eq!(first.base_class_names, vec!["A".to_string(), "B".to_string()]);
        assert!(first.is_abstract);
        assert!(!first.is_template);
        assert_eq!(first.element.location.line, 1);
    }

    #[test]
    fn merge_replaces_placeholder_location() {
        let mut first = ClassEntity::new("C", ElementKind::Class, SourceLocation::unknown("a.cpp"));
        first.merge_declaration(&class("C"));
        assert_eq!(first.element.location.line, 1);
    }

    #[test]
    fn walk_is_pre_order() {
        let mut outer = class("Outer");
        let mut mid = class("Mid");
        mid.nested_classes.push(class("Leaf"));
        outer.nested_classes.push(mid);
        outer.nested_classes.push(class("Sibling"));

        let names: Vec<_> = outer.walk().map(ClassEntity::name).collect();
        assert_eq!(names, vec!["Outer", "Mid", "Leaf", "Sibling"]);
    }
}
