//! # cppscope-parser
//!
//! Turns C++ translation units into nested scope documents.
//!
//! The pipeline for one file:
//! - a [`Frontend`](frontend::Frontend) parses the file into an owned
//!   [`AstNode`](ast::AstNode) tree plus diagnostics (tree-sitter built in,
//!   libclang behind the `libclang` feature)
//! - the [`TreeAggregator`](aggregate::TreeAggregator) walks the tree once,
//!   threading a [`ScopeTracker`](scope::ScopeTracker) and placing every
//!   extracted entity at its lexical owner
//! - the [`Analyzer`](analyzer::Analyzer) wraps both, degrades failures into
//!   flagged documents, and fans projects out over a rayon pool

pub mod aggregate;
pub mod analyzer;
pub mod ast;
pub mod cursor;
pub mod error;
pub mod extract;
pub mod frontend;
pub mod placement;
pub mod project;
pub mod scope;

pub use analyzer::{Analyzer, assemble_document};
pub use error::{AggregateError, AnalysisError, FrontendError};
