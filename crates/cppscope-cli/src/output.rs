use cppscope_core::document::FileDocument;
use cppscope_core::project::ProjectDocument;
use serde::Serialize;

use crate::cli::SchemaKind;

/// Render a serializable document as compact or pretty JSON.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

/// Print a serializable document to stdout.
pub fn output<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = render(value, pretty)?;
    println!("{rendered}");
    Ok(())
}

/// JSON Schema of the requested document type.
pub fn schema(kind: SchemaKind) -> schemars::Schema {
    match kind {
        SchemaKind::File => schemars::schema_for!(FileDocument),
        SchemaKind::Project => schemars::schema_for!(ProjectDocument),
    }
}
