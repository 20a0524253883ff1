use cppscope_core::enums::AccessSpecifier;
use pretty_assertions::assert_eq;

use super::*;
use crate::cursor::{Cursor, CursorKind};

mod classes;
mod enums;
mod includes;
mod namespaces;

fn lower(source: &str) -> ParsedUnit<AstNode> {
    TreeSitterFrontend::new()
        .parse_source("test.cpp", source, &[])
        .expect("lowering should succeed")
}

fn lower_root(source: &str) -> AstNode {
    let unit = lower(source);
    assert!(
        unit.diagnostics.is_empty(),
        "unexpected syntax errors: {:?}",
        unit.diagnostics
    );
    unit.root
}

/// Every node below `root`, pre-order.
fn descendants(root: &AstNode) -> Vec<&AstNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&AstNode> = root.child_nodes().iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.child_nodes().iter().rev());
    }
    out
}

fn find<'a>(root: &'a AstNode, kind: CursorKind, name: &str) -> &'a AstNode {
    descendants(root)
        .into_iter()
        .find(|n| n.kind() == kind && n.spelling() == name)
        .unwrap_or_else(|| {
            let available: Vec<_> = descendants(root)
                .iter()
                .map(|n| format!("{}: {}", n.kind(), n.spelling()))
                .collect();
            panic!(
                "{kind} {name:?} not found. Available nodes:\n{}",
                available.join("\n")
            );
        })
}

fn children_of_kind(node: &AstNode, kind: CursorKind) -> Vec<&AstNode> {
    node.child_nodes().iter().filter(|c| c.kind() == kind).collect()
}

fn spellings(nodes: &[&AstNode]) -> Vec<String> {
    nodes.iter().map(|n| n.spelling()).collect()
}

fn fixture_root() -> AstNode {
    lower_root(include_str!("../../../../tests/fixtures/sample.cpp"))
}
