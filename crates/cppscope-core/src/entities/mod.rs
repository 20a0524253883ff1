//! Entity records produced by the extractors and stored in a
//! [`FileDocument`](crate::document::FileDocument).
//!
//! Every named declaration embeds a [`CodeElement`] header, flattened into
//! the entity on serialization. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod class;
mod diagnostic;
mod element;
mod enumeration;
mod function;
mod include;
mod namespace;
mod variable;

pub use class::ClassEntity;
pub use diagnostic::DiagnosticEntity;
pub use element::CodeElement;
pub use enumeration::{EnumEntity, EnumValue};
pub use function::{FunctionEntity, ParameterEntity};
pub use include::IncludeEntity;
pub use namespace::NamespaceEntity;
pub use variable::VariableEntity;
