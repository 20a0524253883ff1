use pretty_assertions::assert_eq;

use super::*;

// ════════════════════════════════════════════════════════════════
// Enums
// ════════════════════════════════════════════════════════════════

fn values(node: &AstNode) -> Vec<(String, Option<String>)> {
    children_of_kind(node, CursorKind::EnumConstantDecl)
        .iter()
        .map(|c| (c.spelling(), c.enum_constant_value()))
        .collect()
}

#[test]
fn scoped_enum_with_underlying_type() {
    let root = lower_root("enum class Color : unsigned char { Red, Green = 4, Blue };");
    let color = find(&root, CursorKind::EnumDecl, "Color");
    assert!(color.is_scoped_enum());
    assert_eq!(
        color.enum_underlying_type().unwrap().spelling,
        "unsigned char"
    );
    assert_eq!(
        values(color),
        vec![
            ("Red".to_string(), Some("0".to_string())),
            ("Green".to_string(), Some("4".to_string())),
            ("Blue".to_string(), Some("5".to_string())),
        ]
    );
}

#[test]
fn unscoped_enum_defaults_to_int() {
    let root = lower_root("enum Flags { A = 1 << 0, B = 1 << 1, C = A | B, D = -1, E };");
    let flags = find(&root, CursorKind::EnumDecl, "Flags");
    assert!(!flags.is_scoped_enum());
    assert_eq!(flags.enum_underlying_type().unwrap().spelling, "int");
    let got: Vec<_> = values(flags)
        .into_iter()
        .map(|(_, v)| v.unwrap_or_default())
        .collect();
    assert_eq!(got, vec!["1", "2", "3", "-1", "0"]);
}

#[test]
fn unknown_values_propagate_to_implicit_successors() {
    let root = lower_root("enum Sizes { Small = sizeof(int), Large };");
    let sizes = find(&root, CursorKind::EnumDecl, "Sizes");
    assert_eq!(
        values(sizes),
        vec![("Small".to_string(), None), ("Large".to_string(), None)]
    );
}

#[test]
fn enum_in_class_takes_member_access() {
    let root = lower_root("class C {\npublic:\n  enum Mode { On, Off };\n};");
    let mode = find(&root, CursorKind::EnumDecl, "Mode");
    assert_eq!(mode.access(), AccessSpecifier::Public);
}
