//! Built-in front end on the tree-sitter C++ grammar, driven through
//! ast-grep.
//!
//! Only declarations are lowered. Function bodies are skipped, so local
//! variables never reach the aggregator. There is no preprocessor: every
//! branch of a conditional block is read and `-D` macros are ignored.
//! `-I` directories are used to resolve include targets.

mod enum_values;
mod lower;
mod types;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use ast_grep_core::Node;
use ast_grep_language::{LanguageExt, SupportLang};
use cppscope_core::entities::DiagnosticEntity;
use cppscope_core::enums::DiagnosticSeverity;
use cppscope_core::location::SourceLocation;

use super::{Frontend, include_dirs};
use crate::ast::AstNode;
use crate::cursor::ParsedUnit;
use crate::error::FrontendError;

use self::lower::Lowering;

/// Category of diagnostics raised for `ERROR` nodes in the syntax tree.
pub const PARSE_ISSUE_CATEGORY: &str = "Parse Issue";

const SNIPPET_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterFrontend;

impl TreeSitterFrontend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Frontend for TreeSitterFrontend {
    fn name(&self) -> &'static str {
        "tree_sitter"
    }

    fn parse(&self, path: &Path, args: &[String]) -> Result<ParsedUnit<AstNode>, FrontendError> {
        let source = std::fs::read_to_string(path)?;
        self.parse_source(&path.to_string_lossy(), &source, args)
    }

    fn parse_source(
        &self,
        path: &str,
        source: &str,
        args: &[String],
    ) -> Result<ParsedUnit<AstNode>, FrontendError> {
        let grep = SupportLang::Cpp.ast_grep(source);
        let root = grep.root();

        let mut diagnostics = Vec::new();
        collect_syntax_errors(&root, path, &mut diagnostics);

        let source_dir = Path::new(path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let search_dirs = include_dirs(args).into_iter().map(PathBuf::from).collect();
        let unit = Lowering::new(path, source_dir, search_dirs).translation_unit(&root);

        tracing::debug!(
            file = path,
            nodes = unit.node_count(),
            syntax_errors = diagnostics.len(),
            "lowered syntax tree"
        );
        Ok(ParsedUnit {
            root: unit,
            diagnostics,
        })
    }
}

/// One error diagnostic per outermost `ERROR` node.
fn collect_syntax_errors<D: ast_grep_core::Doc>(
    node: &Node<'_, D>,
    path: &str,
    out: &mut Vec<DiagnosticEntity>,
) {
    if node.kind().as_ref() == "ERROR" {
        let pos = node.start_pos();
        let text = node.text();
        let first_line = text.lines().next().unwrap_or_default().trim();
        let snippet: String = first_line.chars().take(SNIPPET_CHARS).collect();
        out.push(DiagnosticEntity {
            severity: DiagnosticSeverity::Error,
            message: format!("syntax error near `{snippet}`"),
            location: SourceLocation::new(
                path,
                u32::try_from(pos.line() + 1).unwrap_or(u32::MAX),
                u32::try_from(pos.column(node) + 1).unwrap_or(u32::MAX),
                u32::try_from(node.range().start).unwrap_or(u32::MAX),
            ),
            category: PARSE_ISSUE_CATEGORY.to_string(),
        });
        return;
    }
    for child in node.children() {
        collect_syntax_errors(&child, path, out);
    }
}
