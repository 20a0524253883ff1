use pretty_assertions::assert_eq;

use super::*;

// ════════════════════════════════════════════════════════════════
// Classes and structs
// ════════════════════════════════════════════════════════════════

#[test]
fn class_members_follow_access_sections() {
    let root = lower_root(
        "class C {\n  int hidden;\npublic:\n  int m() { return 1; }\nprotected:\n  int guarded;\n};\n",
    );
    let class = find(&root, CursorKind::ClassDecl, "C");
    assert_eq!(
        find(class, CursorKind::FieldDecl, "hidden").access(),
        AccessSpecifier::Private
    );
    assert_eq!(
        find(class, CursorKind::Method, "m").access(),
        AccessSpecifier::Public
    );
    assert_eq!(
        find(class, CursorKind::FieldDecl, "guarded").access(),
        AccessSpecifier::Protected
    );
}

#[test]
fn struct_members_default_to_public() {
    let root = lower_root("struct S { int x; };");
    let field = find(&root, CursorKind::FieldDecl, "x");
    assert_eq!(field.access(), AccessSpecifier::Public);
}

#[test]
fn forward_declarations_are_not_lowered() {
    let root = lower_root("class Later;\nstruct Tag;\n");
    assert!(root.child_nodes().is_empty());
}

#[test]
fn base_classes_become_base_specifiers() {
    let root = lower_root("class D : public A, private ns::B {};");
    let class = find(&root, CursorKind::ClassDecl, "D");
    let bases = children_of_kind(class, CursorKind::BaseSpecifier);
    assert_eq!(spellings(&bases), vec!["A", "ns::B"]);
    assert_eq!(bases[1].type_info().unwrap().spelling, "ns::B");
}

#[test]
fn pure_virtual_method_flags() {
    let root = lower_root("class Shape {\npublic:\n  virtual double area() const = 0;\n};");
    let area = find(&root, CursorKind::Method, "area");
    assert!(area.is_virtual_method());
    assert!(area.is_pure_virtual_method());
    assert!(area.is_const_method());
    assert_eq!(area.result_type().unwrap().spelling, "double");
}

#[test]
fn override_implies_virtual() {
    let root = lower_root("struct D : B { void f() override {} };");
    let f = find(&root, CursorKind::Method, "f");
    assert!(f.is_virtual_method());
    assert!(!f.is_pure_virtual_method());
}

#[test]
fn nested_class_is_a_child_of_its_outer_class() {
    let root = lower_root("class Outer {\npublic:\n  class Inner { int v; };\n};");
    let outer = find(&root, CursorKind::ClassDecl, "Outer");
    let inner = find(outer, CursorKind::ClassDecl, "Inner");
    assert_eq!(inner.access(), AccessSpecifier::Public);
    assert_eq!(find(inner, CursorKind::FieldDecl, "v").access(), AccessSpecifier::Private);
}

#[test]
fn template_class_is_a_class_template() {
    let root = lower_root("template <typename T>\nclass Box { T value; };");
    let class = find(&root, CursorKind::ClassTemplate, "Box");
    let field = find(class, CursorKind::FieldDecl, "value");
    assert_eq!(field.type_info().unwrap().spelling, "T");
}

#[test]
fn class_location_points_at_the_name() {
    let root = lower_root("\nclass Named {};");
    let location = find(&root, CursorKind::ClassDecl, "Named").location().unwrap();
    assert_eq!((location.line, location.column), (2, 7));
    assert_eq!(location.byte_offset, 7);
    assert_eq!(location.file_path, "test.cpp");
}
