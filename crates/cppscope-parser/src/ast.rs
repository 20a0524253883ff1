//! Owned cursor tree.
//!
//! Front ends lower their native trees into [`AstNode`]s so the aggregator
//! never holds a borrow into a parser. Tests build trees directly with the
//! `with_*` builder methods.

use std::borrow::Cow;

use cppscope_core::enums::AccessSpecifier;
use cppscope_core::location::SourceLocation;

use crate::cursor::{Cursor, CursorKind, TypeInfo};
use crate::error::FrontendError;

/// Method qualifiers reported by the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MethodFlags {
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_static: bool,
    pub is_const: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    kind: CursorKind,
    spelling: String,
    display_name: Option<String>,
    location: Option<SourceLocation>,
    type_info: Option<TypeInfo>,
    result_type: Option<TypeInfo>,
    access: AccessSpecifier,
    method: MethodFlags,
    is_static_storage: bool,
    is_scoped_enum: bool,
    enum_underlying_type: Option<TypeInfo>,
    enum_constant_value: Option<String>,
    initializer: Option<String>,
    included_file: Option<String>,
    children: Vec<Self>,
}

impl AstNode {
    #[must_use]
    pub fn new(kind: CursorKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            display_name: None,
            location: None,
            type_info: None,
            result_type: None,
            access: AccessSpecifier::Unknown,
            method: MethodFlags::default(),
            is_static_storage: false,
            is_scoped_enum: false,
            enum_underlying_type: None,
            enum_constant_value: None,
            initializer: None,
            included_file: None,
            children: Vec::new(),
        }
    }

    /// A translation-unit root with no location.
    #[must_use]
    pub fn translation_unit(children: Vec<Self>) -> Self {
        Self::new(CursorKind::TranslationUnit, "").with_children(children)
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_type(mut self, type_info: TypeInfo) -> Self {
        self.type_info = Some(type_info);
        self
    }

    #[must_use]
    pub fn with_result_type(mut self, result_type: TypeInfo) -> Self {
        self.result_type = Some(result_type);
        self
    }

    #[must_use]
    pub fn with_access(mut self, access: AccessSpecifier) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub fn with_method_flags(mut self, method: MethodFlags) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_static_storage(mut self, is_static: bool) -> Self {
        self.is_static_storage = is_static;
        self
    }

    #[must_use]
    pub fn with_scoped_enum(mut self, is_scoped: bool) -> Self {
        self.is_scoped_enum = is_scoped;
        self
    }

    #[must_use]
    pub fn with_enum_underlying_type(mut self, underlying: TypeInfo) -> Self {
        self.enum_underlying_type = Some(underlying);
        self
    }

    #[must_use]
    pub fn with_enum_value(mut self, value: impl Into<String>) -> Self {
        self.enum_constant_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    #[must_use]
    pub fn with_included_file(mut self, path: impl Into<String>) -> Self {
        self.included_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    pub fn set_access(&mut self, access: AccessSpecifier) {
        self.access = access;
    }

    #[must_use]
    pub fn child_nodes(&self) -> &[Self] {
        &self.children
    }

    /// Number of nodes in this subtree, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    fn missing(&self, what: &'static str) -> FrontendError {
        FrontendError::Missing {
            what,
            cursor: format!("{} '{}'", self.kind, self.spelling),
        }
    }
}

impl Cursor for AstNode {
    fn kind(&self) -> CursorKind {
        self.kind
    }

    fn spelling(&self) -> String {
        self.spelling.clone()
    }

    fn display_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.spelling.clone())
    }

    fn location(&self) -> Result<SourceLocation, FrontendError> {
        self.location.clone().ok_or_else(|| self.missing("location"))
    }

    fn type_info(&self) -> Result<TypeInfo, FrontendError> {
        self.type_info.clone().ok_or_else(|| self.missing("type"))
    }

    fn result_type(&self) -> Result<TypeInfo, FrontendError> {
        self.result_type
            .clone()
            .ok_or_else(|| self.missing("result type"))
    }

    fn access(&self) -> AccessSpecifier {
        self.access
    }

    fn is_virtual_method(&self) -> bool {
        self.method.is_virtual
    }

    fn is_pure_virtual_method(&self) -> bool {
        self.method.is_pure_virtual
    }

    fn is_static_method(&self) -> bool {
        self.method.is_static
    }

    fn is_const_method(&self) -> bool {
        self.method.is_const
    }

    fn is_static_storage(&self) -> bool {
        self.is_static_storage
    }

    fn is_scoped_enum(&self) -> bool {
        self.is_scoped_enum
    }

    fn enum_underlying_type(&self) -> Result<TypeInfo, FrontendError> {
        self.enum_underlying_type
            .clone()
            .ok_or_else(|| self.missing("underlying type"))
    }

    fn enum_constant_value(&self) -> Option<String> {
        self.enum_constant_value.clone()
    }

    fn initializer(&self) -> Option<String> {
        self.initializer.clone()
    }

    fn included_file(&self) -> Option<String> {
        self.included_file.clone()
    }

    fn children(&self) -> Cow<'_, [Self]> {
        Cow::Borrowed(&self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_errors() {
        let node = AstNode::new(CursorKind::VarDecl, "x");
        let err = node.type_info().unwrap_err();
        assert_eq!(err.to_string(), "var_decl 'x' has no type");
        assert!(node.location().is_err());
    }

    #[test]
    fn display_name_falls_back_to_spelling() {
        let plain = AstNode::new(CursorKind::FunctionDecl, "f");
        assert_eq!(plain.display_name(), "f");
        let named = plain.with_display_name("f(int)");
        assert_eq!(named.display_name(), "f(int)");
    }

    #[test]
    fn node_count_includes_root() {
        let tree = AstNode::translation_unit(vec![
            AstNode::new(CursorKind::Namespace, "a")
                .with_child(AstNode::new(CursorKind::VarDecl, "x")),
            AstNode::new(CursorKind::VarDecl, "y"),
        ]);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.children().len(), 2);
    }
}
