//! Lowering from the tree-sitter C++ grammar to [`AstNode`]s.

use std::path::PathBuf;

use ast_grep_core::Node;
use cppscope_core::enums::AccessSpecifier;
use cppscope_core::location::SourceLocation;

use super::enum_values::EnumEvaluator;
use super::types::{
    self, Declarator, base_type, compose, function_pointer_type, is_declarator, normalize,
    unwrap_declarator,
};
use crate::ast::{AstNode, MethodFlags};
use crate::cursor::{Cursor, CursorKind, TypeInfo};

/// Where an item sits. Decides member kinds and access.
#[derive(Debug, Clone, Copy)]
enum Scope<'c> {
    File,
    Class {
        name: &'c str,
        access: AccessSpecifier,
    },
}

impl<'c> Scope<'c> {
    const fn access(self) -> AccessSpecifier {
        match self {
            Self::File => AccessSpecifier::Unknown,
            Self::Class { access, .. } => access,
        }
    }

    const fn class_name(self) -> Option<&'c str> {
        match self {
            Self::File => None,
            Self::Class { name, .. } => Some(name),
        }
    }
}

pub(super) struct Lowering<'a> {
    file_path: &'a str,
    source_dir: PathBuf,
    include_dirs: Vec<PathBuf>,
}

impl<'a> Lowering<'a> {
    pub fn new(file_path: &'a str, source_dir: PathBuf, include_dirs: Vec<PathBuf>) -> Self {
        Self {
            file_path,
            source_dir,
            include_dirs,
        }
    }

    pub fn translation_unit<D: ast_grep_core::Doc>(&self, root: &Node<'_, D>) -> AstNode {
        let mut children = Vec::new();
        self.items(root, Scope::File, &mut children);
        AstNode::translation_unit(children)
    }

    fn items<D: ast_grep_core::Doc>(&self, parent: &Node<'_, D>, scope: Scope<'_>, out: &mut Vec<AstNode>) {
        for child in parent.children() {
            self.item(&child, scope, false, out);
        }
    }

    fn item<D: ast_grep_core::Doc>(
        &self,
        node: &Node<'_, D>,
        scope: Scope<'_>,
        templated: bool,
        out: &mut Vec<AstNode>,
    ) {
        match node.kind().as_ref() {
            "preproc_include" => out.extend(self.include(node)),
            "namespace_definition" => out.extend(self.namespace(node)),
            "class_specifier" | "struct_specifier" => out.extend(self.class(node, scope, templated)),
            "enum_specifier" => out.extend(self.enumeration(node, scope)),
            "template_declaration" => {
                for child in node.children() {
                    self.item(&child, scope, true, out);
                }
            }
            "function_definition" => {
                if let Some(declarator) = node.field("declarator") {
                    let declarator = unwrap_declarator(declarator);
                    out.extend(self.function(node, &declarator, scope, templated));
                }
            }
            "declaration" | "field_declaration" => self.declaration(node, scope, templated, out),
            "linkage_specification" => {
                if let Some(body) = node.field("body") {
                    self.item(&body, scope, templated, out);
                }
            }
            "declaration_list" | "preproc_if" | "preproc_ifdef" | "preproc_else" | "preproc_elif"
            | "preproc_elifdef" => self.items(node, scope, out),
            _ => {}
        }
    }

    fn location<D: ast_grep_core::Doc>(&self, node: &Node<'_, D>) -> SourceLocation {
        let pos = node.start_pos();
        SourceLocation::new(
            self.file_path,
            to_u32(pos.line() + 1),
            to_u32(pos.column(node) + 1),
            to_u32(node.range().start),
        )
    }

    // ── Preprocessor ───────────────────────────────────────────────

    fn include<D: ast_grep_core::Doc>(&self, node: &Node<'_, D>) -> Option<AstNode> {
        let path = node.field("path")?;
        let text = path.text();
        let (target, is_system) = match path.kind().as_ref() {
            "system_lib_string" => (text.trim_start_matches('<').trim_end_matches('>'), true),
            "string_literal" => (text.trim_matches('"'), false),
            // Computed includes cannot be resolved without a preprocessor.
            _ => return None,
        };

        let mut include = AstNode::new(CursorKind::InclusionDirective, target)
            .with_display_name(normalize(&node.text()))
            .with_location(self.location(node));
        if let Some(found) = self.resolve_include(target, is_system) {
            include = include.with_included_file(found);
        }
        Some(include)
    }

    /// Quoted includes search the including file's directory first, then
    /// the `-I` directories in order.
    fn resolve_include(&self, target: &str, is_system: bool) -> Option<String> {
        let local = (!is_system).then_some(&self.source_dir);
        local
            .into_iter()
            .chain(self.include_dirs.iter())
            .map(|dir| dir.join(target))
            .find(|candidate| candidate.is_file())
            .map(|found| found.to_string_lossy().into_owned())
    }

    // ── Namespaces ─────────────────────────────────────────────────

    /// `namespace a::b { }` lowers to two nested namespace nodes.
    fn namespace<D: ast_grep_core::Doc>(&self, node: &Node<'_, D>) -> Option<AstNode> {
        let name_node = node.field("name");
        let location = self.location(name_node.as_ref().unwrap_or(node));
        let mut names: Vec<String> = name_node.map_or_else(
            || vec![String::new()],
            |n| {
                n.text()
                    .split("::")
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(ToString::to_string)
                    .collect()
            },
        );

        let mut body = Vec::new();
        if let Some(list) = node.field("body") {
            self.items(&list, Scope::File, &mut body);
        }

        let innermost = names.pop()?;
        let mut lowered = AstNode::new(CursorKind::Namespace, innermost)
            .with_location(location.clone())
            .with_children(body);
        while let Some(outer) = names.pop() {
            lowered = AstNode::new(CursorKind::Namespace, outer)
                .with_location(location.clone())
                .with_child(lowered);
        }
        Some(lowered)
    }

    // ── Classes ────────────────────────────────────────────────────

    /// Only definitions are lowered. A specifier without a body is a forward
    /// declaration or an elaborated type reference.
    fn class<D: ast_grep_core::Doc>(
        &self,
        node: &Node<'_, D>,
        scope: Scope<'_>,
        templated: bool,
    ) -> Option<AstNode> {
        let body = node.field("body")?;
        let is_struct = node.kind().as_ref() == "struct_specifier";
        let kind = if templated {
            CursorKind::ClassTemplate
        } else if is_struct {
            CursorKind::StructDecl
        } else {
            CursorKind::ClassDecl
        };
        let (name, location) = match node.field("name") {
            Some(name_node) => (types::name_text(&name_node), self.location(&name_node)),
            None => (String::new(), self.location(node)),
        };

        let mut children = Vec::new();
        if let Some(clause) = node
            .children()
            .find(|c| c.kind().as_ref() == "base_class_clause")
        {
            for base in clause.children() {
                if matches!(
                    base.kind().as_ref(),
                    "type_identifier" | "qualified_identifier" | "template_type"
                ) {
                    let spelling = normalize(&base.text());
                    children.push(
                        AstNode::new(CursorKind::BaseSpecifier, spelling.clone())
                            .with_type(TypeInfo::named(spelling))
                            .with_location(self.location(&base)),
                    );
                }
            }
        }

        let default_access = if is_struct {
            AccessSpecifier::Public
        } else {
            AccessSpecifier::Private
        };
        self.class_body(&body, &name, default_access, &mut children);

        Some(
            AstNode::new(kind, name)
                .with_location(location)
                .with_access(scope.access())
                .with_children(children),
        )
    }

    fn class_body<D: ast_grep_core::Doc>(
        &self,
        body: &Node<'_, D>,
        class_name: &str,
        default_access: AccessSpecifier,
        out: &mut Vec<AstNode>,
    ) {
        let mut access = default_access;
        for child in body.children() {
            if child.kind().as_ref() == "access_specifier" {
                access = parse_access(&child.text()).unwrap_or(access);
                continue;
            }
            let scope = Scope::Class {
                name: class_name,
                access,
            };
            self.item(&child, scope, false, out);
        }
    }

    // ── Enums ──────────────────────────────────────────────────────

    fn enumeration<D: ast_grep_core::Doc>(&self, node: &Node<'_, D>, scope: Scope<'_>) -> Option<AstNode> {
        let body = node.field("body")?;
        let (name, location) = match node.field("name") {
            Some(name_node) => (types::name_text(&name_node), self.location(&name_node)),
            None => (String::new(), self.location(node)),
        };
        let is_scoped = node
            .children()
            .any(|c| matches!(c.kind().as_ref(), "class" | "struct"));
        let underlying = node
            .field("base")
            .map_or_else(|| "int".to_string(), |base| normalize(&base.text()));

        let mut evaluator = EnumEvaluator::new();
        let mut constants = Vec::new();
        for enumerator in body
            .children()
            .filter(|c| c.kind().as_ref() == "enumerator")
        {
            let Some(name_node) = enumerator.field("name") else {
                continue;
            };
            let constant_name = name_node.text().to_string();
            let value = evaluator.next(&constant_name, enumerator.field("value").as_ref());
            let mut constant = AstNode::new(CursorKind::EnumConstantDecl, constant_name)
                .with_location(self.location(&name_node));
            if let Some(value) = value {
                constant = constant.with_enum_value(value.to_string());
            }
            constants.push(constant);
        }

        Some(
            AstNode::new(CursorKind::EnumDecl, name)
                .with_location(location)
                .with_access(scope.access())
                .with_scoped_enum(is_scoped)
                .with_enum_underlying_type(TypeInfo::named(underlying))
                .with_children(constants),
        )
    }

    // ── Declarations ───────────────────────────────────────────────

    /// Variables, fields, and function prototypes, plus any class or enum
    /// defined inline as the declaration's type.
    fn declaration<D: ast_grep_core::Doc>(
        &self,
        node: &Node<'_, D>,
        scope: Scope<'_>,
        templated: bool,
        out: &mut Vec<AstNode>,
    ) {
        let type_node = node.field("type");
        if let Some(ty) = &type_node
            && matches!(
                ty.kind().as_ref(),
                "class_specifier" | "struct_specifier" | "enum_specifier"
            )
        {
            self.item(ty, scope, false, out);
        }

        let base = base_type(node);
        let is_static = has_storage(node, "static");
        let type_range = type_node.map(|t| t.range());

        for child in node.children() {
            let kind = child.kind();
            // Past `=` or `:` is a default member initializer or bit width.
            if matches!(kind.as_ref(), "=" | "bitfield_clause") {
                break;
            }
            if !child.is_named() || !is_declarator(kind.as_ref()) {
                continue;
            }
            if type_range.as_ref() == Some(&child.range()) {
                continue;
            }

            let declarator = unwrap_declarator(child.clone());
            if declarator.function.is_some() && !declarator.is_function_pointer {
                // A typeless prototype at file scope is a macro call, not a
                // declaration.
                if base.is_some() || scope.class_name().is_some() {
                    out.extend(self.function(node, &declarator, scope, templated));
                }
                continue;
            }
            out.extend(self.variable(node, &child, &declarator, base.as_ref(), is_static, scope));
        }
    }

    fn variable<D: ast_grep_core::Doc>(
        &self,
        decl: &Node<'_, D>,
        raw: &Node<'_, D>,
        declarator: &Declarator<'_, D>,
        base: Option<&(String, bool)>,
        is_static: bool,
        scope: Scope<'_>,
    ) -> Option<AstNode> {
        let name_node = declarator.name.as_ref()?;
        let name = declarator.name_text();
        let (base_spelling, base_const) = base.cloned().unwrap_or_default();
        let type_info = if declarator.function.is_some() {
            function_pointer_type(&base_spelling, raw, &name)
        } else {
            compose(&base_spelling, base_const, &declarator.modifiers)
        };

        let kind = if scope.class_name().is_some() && !is_static {
            CursorKind::FieldDecl
        } else {
            CursorKind::VarDecl
        };
        let initializer = declarator.initializer.clone().or_else(|| {
            decl.field("default_value")
                .map(|value| types::initializer_text(&value.text()))
        });

        let mut variable = AstNode::new(kind, name)
            .with_location(self.location(name_node))
            .with_type(type_info)
            .with_static_storage(is_static)
            .with_access(scope.access());
        if let Some(initializer) = initializer {
            variable = variable.with_initializer(initializer);
        }
        Some(variable)
    }

    // ── Functions ──────────────────────────────────────────────────

    /// A function definition or prototype. `decl` is the node carrying the
    /// specifiers and return type.
    fn function<D: ast_grep_core::Doc>(
        &self,
        decl: &Node<'_, D>,
        declarator: &Declarator<'_, D>,
        scope: Scope<'_>,
        templated: bool,
    ) -> Option<AstNode> {
        let name_node = declarator.name.as_ref()?;
        let function = declarator.function.as_ref()?;
        let name = declarator.name_text();
        let qualifier = types::qualifier_text(name_node);
        let has_type = decl.field("type").is_some();

        let is_destructor = name.starts_with('~');
        let is_constructor = !is_destructor
            && !has_type
            && match (&qualifier, scope.class_name()) {
                (Some(owner), _) => types::strip_template_args(&types::last_segment(owner)) == name,
                (None, Some(class)) => class == name,
                (None, None) => false,
            };
        let kind = if is_destructor {
            CursorKind::Destructor
        } else if is_constructor {
            CursorKind::Constructor
        } else if templated {
            CursorKind::FunctionTemplate
        } else if scope.class_name().is_some() || qualifier.is_some() {
            CursorKind::Method
        } else {
            CursorKind::FunctionDecl
        };

        let parameters = function
            .field("parameters")
            .map(|list| self.parameters(&list))
            .unwrap_or_default();
        let display_name = format!(
            "{name}({})",
            parameters
                .iter()
                .map(|p| p.type_info().map(|t| t.spelling).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let in_class = scope.class_name().is_some();
        let flags = MethodFlags {
            is_virtual: decl.children().any(|c| c.text().as_ref() == "virtual")
                || function
                    .children()
                    .any(|c| c.kind().as_ref() == "virtual_specifier"),
            is_pure_virtual: is_pure_virtual(decl),
            is_static: in_class && has_storage(decl, "static"),
            is_const: function
                .children()
                .any(|c| c.kind().as_ref() == "type_qualifier" && c.text().as_ref() == "const"),
        };

        let mut lowered = AstNode::new(kind, name)
            .with_display_name(display_name)
            .with_location(self.location(name_node))
            .with_access(scope.access())
            .with_method_flags(flags)
            .with_children(parameters);
        if is_constructor || is_destructor {
            lowered = lowered.with_result_type(TypeInfo::named("void"));
        } else if let Some((base, base_const)) = base_type(decl) {
            let trailing = function
                .children()
                .find(|c| c.kind().as_ref() == "trailing_return_type")
                .map(|t| normalize(t.text().trim_start_matches("->")));
            let result = match trailing {
                Some(trailing) if base == "auto" => TypeInfo::named(trailing),
                _ => compose(&base, base_const, &declarator.modifiers),
            };
            lowered = lowered.with_result_type(result);
        } else if let Some((base, base_const)) =
            types::operator_cast(name_node).and_then(|cast| base_type(&cast))
        {
            // `operator const char *()` returns its target type.
            lowered = lowered.with_result_type(compose(&base, base_const, &declarator.modifiers));
        }
        Some(lowered)
    }

    fn parameters<D: ast_grep_core::Doc>(&self, list: &Node<'_, D>) -> Vec<AstNode> {
        list.children()
            .filter(|p| {
                matches!(
                    p.kind().as_ref(),
                    "parameter_declaration" | "optional_parameter_declaration"
                )
            })
            .filter(|p| !is_void_parameter(p))
            .map(|p| self.parameter(&p))
            .collect()
    }

    fn parameter<D: ast_grep_core::Doc>(&self, param: &Node<'_, D>) -> AstNode {
        let (base, base_const) = base_type(param).unwrap_or_default();
        let (name, type_info, location) = match param.field("declarator") {
            Some(raw) => {
                let declarator = unwrap_declarator(raw.clone());
                let name = declarator.name_text();
                let type_info = if declarator.function.is_some() {
                    function_pointer_type(&base, &raw, &name)
                } else {
                    compose(&base, base_const, &declarator.modifiers)
                };
                let location = declarator
                    .name
                    .as_ref()
                    .map_or_else(|| self.location(param), |n| self.location(n));
                (name, type_info, location)
            }
            None => (String::new(), compose(&base, base_const, &[]), self.location(param)),
        };

        let mut lowered = AstNode::new(CursorKind::ParmDecl, name)
            .with_type(type_info)
            .with_location(location);
        if let Some(default) = param.field("default_value") {
            lowered = lowered.with_initializer(normalize(&default.text()));
        }
        lowered
    }
}

fn parse_access(text: &str) -> Option<AccessSpecifier> {
    match text.trim().trim_end_matches(':').trim() {
        "public" => Some(AccessSpecifier::Public),
        "protected" => Some(AccessSpecifier::Protected),
        "private" => Some(AccessSpecifier::Private),
        _ => None,
    }
}

fn has_storage<D: ast_grep_core::Doc>(node: &Node<'_, D>, storage: &str) -> bool {
    node.children()
        .any(|c| c.kind().as_ref() == "storage_class_specifier" && c.text().as_ref() == storage)
}

/// `= 0` after the declarator.
fn is_pure_virtual<D: ast_grep_core::Doc>(node: &Node<'_, D>) -> bool {
    node.field("default_value")
        .is_some_and(|v| v.text().as_ref() == "0")
        || node
            .children()
            .any(|c| c.kind().as_ref() == "number_literal" && c.text().as_ref() == "0")
}

/// The `void` in `f(void)`.
fn is_void_parameter<D: ast_grep_core::Doc>(param: &Node<'_, D>) -> bool {
    param.field("declarator").is_none()
        && param
            .field("type")
            .is_some_and(|t| t.text().as_ref() == "void")
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
