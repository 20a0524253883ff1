//! Source positions attached to every recorded entity.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A position in a source file.
///
/// Lines and columns are 1-based as reported by the front end. The
/// placeholder produced by [`SourceLocation::unknown`] uses `0:0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: u32,
    pub column: u32,
    pub byte_offset: u32,
}

impl SourceLocation {
    #[must_use]
    pub fn new(file_path: impl Into<String>, line: u32, column: u32, byte_offset: u32) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            column,
            byte_offset,
        }
    }

    /// Placeholder location for entities whose real position is unavailable.
    #[must_use]
    pub fn unknown(file_path: impl Into<String>) -> Self {
        Self::new(file_path, 0, 0, 0)
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.line == 0 && self.column == 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.column)
    }
}
