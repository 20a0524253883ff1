//! # cppscope-core
//!
//! Document model and error types for cppscope.
//!
//! This crate provides the types shared across all cppscope crates:
//! - Source locations and the common [`CodeElement`](entities::CodeElement) header
//! - Entity records for namespaces, classes, functions, variables, enums,
//!   includes, and diagnostics
//! - Kind, access, and severity enums
//! - The per-file [`FileDocument`](document::FileDocument) and the
//!   multi-file [`ProjectDocument`](project::ProjectDocument)
//! - Cross-cutting error types

pub mod document;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod location;
pub mod project;
