//! Multi-file analysis settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Worker threads for project analysis. `0` lets rayon decide.
    #[serde(default)]
    pub workers: usize,
}
