//! Traversal behaviour over hand-built cursor trees.

use cppscope_core::document::FileDocument;
use cppscope_core::entities::DiagnosticEntity;
use cppscope_core::enums::{AccessSpecifier, ElementKind};
use cppscope_core::location::SourceLocation;
use cppscope_parser::aggregate::TreeAggregator;
use cppscope_parser::ast::{AstNode, MethodFlags};
use cppscope_parser::cursor::{CursorKind, TypeInfo};
use cppscope_parser::error::AggregateError;
use pretty_assertions::assert_eq;

const FILE: &str = "main.cpp";

fn at(line: u32) -> SourceLocation {
    SourceLocation::new(FILE, line, 1, line * 20)
}

fn node(kind: CursorKind, name: &str, line: u32) -> AstNode {
    AstNode::new(kind, name).with_location(at(line))
}

fn method(name: &str, line: u32) -> AstNode {
    node(CursorKind::Method, name, line)
        .with_result_type(TypeInfo::named("int"))
        .with_access(AccessSpecifier::Public)
}

fn aggregate(children: Vec<AstNode>) -> FileDocument {
    TreeAggregator::new(FILE, 256)
        .run(&AstNode::translation_unit(children))
        .expect("aggregation should succeed")
}

fn names<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, name: fn(&T) -> &str) -> Vec<String> {
    items.into_iter().map(|i| name(i).to_string()).collect()
}

// ════════════════════════════════════════════════════════════════
// End-to-end scenario
// ════════════════════════════════════════════════════════════════

/// `int g = 5; void f() {} class C { public: int m() { return 1; } };`
fn scenario() -> Vec<AstNode> {
    vec![
        node(CursorKind::VarDecl, "g", 1)
            .with_type(TypeInfo::named("int"))
            .with_initializer("5"),
        node(CursorKind::FunctionDecl, "f", 2).with_result_type(TypeInfo::named("void")),
        node(CursorKind::ClassDecl, "C", 3).with_child(method("m", 3)),
    ]
}

#[test]
fn scenario_places_each_entity_once() {
    let doc = aggregate(scenario());

    assert_eq!(doc.variables.len(), 1);
    assert_eq!(doc.variables[0].name(), "g");
    assert_eq!(doc.variables[0].type_name, "int");
    assert_eq!(doc.variables[0].initial_value.as_deref(), Some("5"));

    assert_eq!(doc.functions.len(), 1);
    assert_eq!(doc.functions[0].name(), "f");
    assert_eq!(doc.functions[0].element.kind, ElementKind::Function);

    assert_eq!(doc.classes.len(), 1);
    let class = &doc.classes[0];
    assert_eq!(class.methods.len(), 1);
    let m = &class.methods[0];
    assert_eq!(m.element.kind, ElementKind::Method);
    assert_eq!(m.return_type_name, "int");
    assert_eq!(m.access_specifier, AccessSpecifier::Public);
    assert_eq!(m.owning_class_qualified_name.as_deref(), Some("C"));

    let stats = doc.statistics();
    assert_eq!(stats.total_classes, 1);
    assert_eq!(stats.total_functions, 2, "f plus C::m, each counted once");
    assert_eq!(stats.total_variables, 1);
    assert_eq!(stats.total_namespaces, 0);
}

#[test]
fn traversal_is_idempotent() {
    let root = AstNode::translation_unit(scenario());
    let first = TreeAggregator::new(FILE, 256).run(&root).unwrap();
    let second = TreeAggregator::new(FILE, 256).run(&root).unwrap();
    assert_eq!(first, second);
}

// ════════════════════════════════════════════════════════════════
// Namespaces
// ════════════════════════════════════════════════════════════════

#[test]
fn reopened_namespace_is_merged() {
    let doc = aggregate(vec![
        node(CursorKind::Namespace, "N", 1).with_child(node(CursorKind::ClassDecl, "A", 2)),
        node(CursorKind::Namespace, "N", 5).with_child(node(CursorKind::ClassDecl, "B", 6)),
    ]);
    assert_eq!(doc.namespaces.len(), 1);
    let n = &doc.namespaces[0];
    assert_eq!(n.element.location.line, 1, "first declaration wins");
    assert_eq!(names(&n.classes, |c| c.name()), vec!["A", "B"]);
}

#[test]
fn method_in_namespaced_class_is_attributed_to_the_class() {
    let doc = aggregate(vec![node(CursorKind::Namespace, "N", 1).with_child(
        node(CursorKind::ClassDecl, "C", 2).with_child(method("m", 3)),
    )]);

    assert!(doc.functions.is_empty());
    let n = doc.namespace("N").expect("namespace N");
    assert!(n.functions.is_empty());
    let class = &n.classes[0];
    assert_eq!(class.owning_namespace_path.as_deref(), Some("N"));
    assert_eq!(class.methods.len(), 1);
    assert_eq!(
        class.methods[0].owning_class_qualified_name.as_deref(),
        Some("C")
    );
}

#[test]
fn nested_namespaces_record_parent_paths() {
    let doc = aggregate(vec![node(CursorKind::Namespace, "a", 1).with_child(
        node(CursorKind::Namespace, "b", 2).with_child(
            node(CursorKind::FunctionDecl, "f", 3).with_result_type(TypeInfo::named("void")),
        ),
    )]);
    let b = doc.namespace("a::b").expect("namespace a::b");
    assert_eq!(b.parent_namespace_path.as_deref(), Some("a"));
    assert_eq!(names(&b.functions, |f| f.name()), vec!["f"]);
    assert_eq!(doc.statistics().total_namespaces, 2);
}

#[test]
fn anonymous_scopes_are_dropped_with_their_members() {
    let doc = aggregate(vec![
        node(CursorKind::Namespace, "", 1).with_child(
            node(CursorKind::VarDecl, "hidden", 2).with_type(TypeInfo::named("int")),
        ),
        node(CursorKind::StructDecl, "", 4).with_child(
            node(CursorKind::FieldDecl, "x", 4).with_type(TypeInfo::named("int")),
        ),
        node(CursorKind::VarDecl, "g", 4).with_type(TypeInfo::named("(anonymous)")),
    ]);
    assert!(doc.namespaces.is_empty());
    assert!(doc.classes.is_empty());
    assert_eq!(names(&doc.variables, |v| v.name()), vec!["g"]);
    assert_eq!(doc.statistics().total_variables, 1);
}

// ════════════════════════════════════════════════════════════════
// Classes
// ════════════════════════════════════════════════════════════════

#[test]
fn abstractness_comes_from_direct_pure_virtuals_only() {
    let pure = MethodFlags {
        is_virtual: true,
        is_pure_virtual: true,
        ..MethodFlags::default()
    };
    let doc = aggregate(vec![
        node(CursorKind::ClassDecl, "Base", 1)
            .with_child(method("area", 2).with_method_flags(pure)),
        node(CursorKind::ClassDecl, "Derived", 5)
            .with_child(
                AstNode::new(CursorKind::BaseSpecifier, "Base")
                    .with_type(TypeInfo::named("Base"))
                    .with_location(at(5)),
            )
            .with_child(method("radius", 6)),
    ]);

    let base = doc.class("Base").unwrap();
    let derived = doc.class("Derived").unwrap();
    assert!(base.is_abstract);
    assert!(!derived.is_abstract);
    assert_eq!(derived.base_class_names, vec!["Base".to_string()]);
}

#[test]
fn nested_class_members_go_to_the_nested_class() {
    let doc = aggregate(vec![node(CursorKind::ClassDecl, "Outer", 1)
        .with_child(node(CursorKind::ClassDecl, "Inner", 2).with_child(method("f", 3)))
        .with_child(method("g", 5))]);

    let outer = &doc.classes[0];
    assert_eq!(names(&outer.methods, |m| m.name()), vec!["g"]);
    assert_eq!(outer.nested_classes.len(), 1);
    let inner = &outer.nested_classes[0];
    assert_eq!(names(&inner.methods, |m| m.name()), vec!["f"]);
    assert_eq!(
        inner.methods[0].owning_class_qualified_name.as_deref(),
        Some("Outer::Inner")
    );
    assert_eq!(doc.statistics().total_classes, 2);
}

#[test]
fn redeclared_class_is_merged() {
    let base = |name: &str| {
        AstNode::new(CursorKind::BaseSpecifier, name).with_type(TypeInfo::named(name))
    };
    let doc = aggregate(vec![
        node(CursorKind::ClassDecl, "C", 1)
            .with_child(base("A"))
            .with_child(method("first", 2)),
        node(CursorKind::ClassDecl, "C", 9)
            .with_child(base("A"))
            .with_child(base("B"))
            .with_child(method("second", 10)),
    ]);
    assert_eq!(doc.classes.len(), 1);
    let class = &doc.classes[0];
    assert_eq!(class.element.location.line, 1);
    assert_eq!(class.base_class_names, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(names(&class.methods, |m| m.name()), vec!["first", "second"]);
}

#[test]
fn class_template_is_a_template_class() {
    let doc = aggregate(vec![node(CursorKind::ClassTemplate, "Box", 1)]);
    let class = &doc.classes[0];
    assert!(class.is_template);
    assert_eq!(class.element.kind, ElementKind::Class);
}

#[test]
fn struct_members_and_enums_attach_to_the_struct() {
    let doc = aggregate(vec![node(CursorKind::StructDecl, "S", 1)
        .with_child(
            node(CursorKind::FieldDecl, "x", 2)
                .with_type(TypeInfo::named("int"))
                .with_access(AccessSpecifier::Public),
        )
        .with_child(
            node(CursorKind::EnumDecl, "Mode", 3)
                .with_enum_underlying_type(TypeInfo::named("int"))
                .with_child(node(CursorKind::EnumConstantDecl, "On", 3).with_enum_value("0")),
        )]);

    let s = &doc.classes[0];
    assert_eq!(s.element.kind, ElementKind::Struct);
    assert_eq!(names(&s.fields, |f| f.name()), vec!["x"]);
    assert_eq!(s.fields[0].element.kind, ElementKind::Field);
    assert_eq!(s.nested_enums.len(), 1);
    assert_eq!(s.nested_enums[0].value_of("On"), Some("0"));
    assert!(doc.enums.is_empty());
    assert_eq!(doc.statistics().total_variables, 0, "fields are not variables");
}

#[test]
fn out_of_line_method_definition_is_a_top_level_function() {
    let doc = aggregate(vec![
        node(CursorKind::ClassDecl, "C", 1).with_child(method("m", 2)),
        method("m", 5),
    ]);
    assert_eq!(doc.classes[0].methods.len(), 1);
    assert_eq!(doc.functions.len(), 1);
    assert_eq!(doc.functions[0].element.kind, ElementKind::Function);
    assert_eq!(doc.functions[0].owning_class_qualified_name, None);
}

// ════════════════════════════════════════════════════════════════
// Robustness
// ════════════════════════════════════════════════════════════════

#[test]
fn missing_location_and_type_degrade_to_defaults() {
    let doc = aggregate(vec![AstNode::new(CursorKind::VarDecl, "bare")]);
    let bare = &doc.variables[0];
    assert_eq!(bare.element.location, SourceLocation::unknown(FILE));
    assert_eq!(bare.type_name, "");
}

#[test]
fn nodes_from_other_files_are_skipped_except_includes() {
    let elsewhere = SourceLocation::new("other.h", 1, 1, 0);
    let doc = aggregate(vec![
        AstNode::new(CursorKind::InclusionDirective, "vector")
            .with_display_name("#include <vector>")
            .with_location(elsewhere.clone()),
        AstNode::new(CursorKind::ClassDecl, "Foreign").with_location(elsewhere),
        node(CursorKind::ClassDecl, "Local", 3),
    ]);
    assert_eq!(names(&doc.classes, |c| c.name()), vec!["Local"]);
    assert_eq!(doc.includes.len(), 1);
    assert!(doc.includes[0].is_system_include);
    assert!(!doc.includes[0].is_found);
}

#[test]
fn depth_limit_aborts_the_run() {
    let mut deep = node(CursorKind::ClassDecl, "Leaf", 1);
    for _ in 0..8 {
        deep = AstNode::new(CursorKind::Other, "").with_child(deep);
    }
    let result = TreeAggregator::new(FILE, 4).run(&AstNode::translation_unit(vec![deep]));
    assert!(matches!(result, Err(AggregateError::DepthExceeded { limit: 4 })));
}

#[test]
fn existing_document_content_is_kept() {
    let mut seed = FileDocument::new(FILE);
    seed.diagnostics
        .push(DiagnosticEntity::analysis_failure(FILE, "note from earlier"));
    seed.metadata
        .insert("cpp_standard".into(), serde_json::Value::from("c++20"));

    let doc = TreeAggregator::with_document(seed, 256)
        .run(&AstNode::translation_unit(scenario()))
        .unwrap();
    assert_eq!(doc.diagnostics.len(), 1);
    assert_eq!(doc.metadata["cpp_standard"], serde_json::Value::from("c++20"));
    assert_eq!(doc.classes.len(), 1);
}
