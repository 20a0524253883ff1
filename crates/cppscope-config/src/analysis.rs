//! Per-file analysis settings: language standard, preprocessor inputs, and
//! front-end selection.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Language standards accepted for `cpp_standard`.
pub const SUPPORTED_STANDARDS: &[&str] = &[
    "c++98", "c++03", "c++11", "c++14", "c++17", "c++20", "c++23", "c++2c", "gnu++11",
    "gnu++14", "gnu++17", "gnu++20", "gnu++23",
];

const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "hxx"];
const SOURCE_EXTENSIONS: &[&str] = &["cpp", "cxx", "cc"];

fn default_cpp_standard() -> String {
    "c++17".to_string()
}

/// Maximum traversal depth before a file is reported as failed.
const fn default_max_depth() -> usize {
    512
}

/// Which front end produces the cursor tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontendKind {
    /// Built-in tree-sitter C++ grammar. No system dependencies.
    #[default]
    TreeSitter,
    /// System libclang. Requires the `libclang` feature of `cppscope-parser`.
    Libclang,
}

impl FrontendKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TreeSitter => "tree_sitter",
            Self::Libclang => "libclang",
        }
    }
}

impl fmt::Display for FrontendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Value passed as `-std=`.
    #[serde(default = "default_cpp_standard")]
    pub cpp_standard: String,

    /// Directories passed as `-I`.
    #[serde(default)]
    pub include_paths: Vec<String>,

    /// Macros passed as `-D` (`NAME` or `NAME=VALUE`).
    #[serde(default)]
    pub defines: Vec<String>,

    /// Arguments appended verbatim after the generated ones.
    #[serde(default)]
    pub extra_args: Vec<String>,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub frontend: FrontendKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cpp_standard: default_cpp_standard(),
            include_paths: Vec::new(),
            defines: Vec::new(),
            extra_args: Vec::new(),
            max_depth: default_max_depth(),
            frontend: FrontendKind::default(),
        }
    }
}

impl AnalysisConfig {
    /// Compiler arguments for analyzing `path`.
    ///
    /// Order: `-std=`, `-I` paths, `-D` macros, extra args, then `-x c++-header`
    /// for header extensions or `-x c++` for source extensions. Other
    /// extensions get no `-x`.
    #[must_use]
    pub fn compiler_args(&self, path: &Path) -> Vec<String> {
        let mut args = vec![format!("-std={}", self.cpp_standard)];
        args.extend(self.include_paths.iter().map(|p| format!("-I{p}")));
        args.extend(self.defines.iter().map(|d| format!("-D{d}")));
        args.extend(self.extra_args.iter().cloned());

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if HEADER_EXTENSIONS.contains(&ext.as_str()) {
            args.extend(["-x".to_string(), "c++-header".to_string()]);
        } else if SOURCE_EXTENSIONS.contains(&ext.as_str()) {
            args.extend(["-x".to_string(), "c++".to_string()]);
        }
        args
    }

    /// Check field values that serde cannot express.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an unknown standard or a zero
    /// depth limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_STANDARDS.contains(&self.cpp_standard.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "analysis.cpp_standard".into(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.cpp_standard,
                    SUPPORTED_STANDARDS.join(", ")
                ),
            });
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_depth".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn defaults_are_correct() {
        let config = AnalysisConfig::default();
        assert_eq!(config.cpp_standard, "c++17");
        assert!(config.include_paths.is_empty());
        assert_eq!(config.max_depth, 512);
        assert_eq!(config.frontend, FrontendKind::TreeSitter);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn compiler_args_are_ordered() {
        let config = AnalysisConfig {
            cpp_standard: "c++20".into(),
            include_paths: vec!["include".into(), "/opt/x".into()],
            defines: vec!["DEBUG".into(), "LEVEL=2".into()],
            extra_args: vec!["-Wall".into()],
            ..AnalysisConfig::default()
        };
        assert_eq!(
            config.compiler_args(Path::new("src/main.cpp")),
            vec![
                "-std=c++20",
                "-Iinclude",
                "-I/opt/x",
                "-DDEBUG",
                "-DLEVEL=2",
                "-Wall",
                "-x",
                "c++",
            ]
        );
    }

    #[rstest]
    #[case("a.h", Some("c++-header"))]
    #[case("a.HPP", Some("c++-header"))]
    #[case("a.hxx", Some("c++-header"))]
    #[case("a.cc", Some("c++"))]
    #[case("a.cxx", Some("c++"))]
    #[case("a.inl", None)]
    #[case("Makefile", None)]
    fn language_flag_follows_extension(#[case] path: &str, #[case] lang: Option<&str>) {
        let args = AnalysisConfig::default().compiler_args(Path::new(path));
        let x = args
            .iter()
            .position(|a| a == "-x")
            .map(|i| args[i + 1].as_str());
        assert_eq!(x, lang);
    }

    #[test]
    fn unknown_standard_is_rejected() {
        let config = AnalysisConfig {
            cpp_standard: "c++99".into(),
            ..AnalysisConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("analysis.cpp_standard"));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = AnalysisConfig {
            max_depth: 0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
