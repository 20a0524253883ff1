use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::location::SourceLocation;

/// An `#include` directive of the analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IncludeEntity {
    /// Resolved path when the front end found the file, spelled path otherwise.
    pub included_path: String,
    /// `<...>` form.
    pub is_system_include: bool,
    pub is_found: bool,
    pub location: SourceLocation,
}
