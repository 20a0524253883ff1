use pretty_assertions::assert_eq;

use super::*;

// ════════════════════════════════════════════════════════════════
// Namespaces
// ════════════════════════════════════════════════════════════════

#[test]
fn nested_namespaces_nest() {
    let root = lower_root("namespace a { namespace b { class X {}; } }");
    let a = find(&root, CursorKind::Namespace, "a");
    let b = find(a, CursorKind::Namespace, "b");
    find(b, CursorKind::ClassDecl, "X");
}

#[test]
fn compact_nested_namespace_is_split() {
    let root = lower_root("namespace a::b { int v; }");
    let outer = children_of_kind(&root, CursorKind::Namespace);
    assert_eq!(spellings(&outer), vec!["a"]);
    let inner = children_of_kind(outer[0], CursorKind::Namespace);
    assert_eq!(spellings(&inner), vec!["b"]);
    find(inner[0], CursorKind::VarDecl, "v");
}

#[test]
fn anonymous_namespace_has_empty_spelling() {
    let root = lower_root("namespace { int hidden; }");
    let anonymous = find(&root, CursorKind::Namespace, "");
    find(anonymous, CursorKind::VarDecl, "hidden");
}

#[test]
fn reopened_namespace_is_lowered_twice() {
    let root = lower_root("namespace n { int a; }\nnamespace n { int b; }\n");
    let opened = children_of_kind(&root, CursorKind::Namespace);
    assert_eq!(opened.len(), 2, "merging is the aggregator's job");
}
