//! Environment variables take precedence over every file layer.

use cppscope_config::{CppscopeConfig, FrontendKind};
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn env_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("CPPSCOPE_ANALYSIS__CPP_STANDARD", "c++11");
        jail.set_env("CPPSCOPE_ANALYSIS__MAX_DEPTH", "32");
        jail.set_env("CPPSCOPE_PROJECT__WORKERS", "2");

        let config: CppscopeConfig = CppscopeConfig::figment().extract()?;
        assert_eq!(config.analysis.cpp_standard, "c++11");
        assert_eq!(config.analysis.max_depth, 32);
        assert_eq!(config.project.workers, 2);
        Ok(())
    });
}

#[test]
fn env_overrides_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cppscope")?;
        jail.create_file(
            ".cppscope/config.toml",
            r#"
[analysis]
cpp_standard = "c++14"
frontend = "tree_sitter"
"#,
        )?;
        jail.set_env("CPPSCOPE_ANALYSIS__CPP_STANDARD", "c++23");
        jail.set_env("CPPSCOPE_ANALYSIS__FRONTEND", "libclang");

        let config: CppscopeConfig = CppscopeConfig::figment().extract()?;
        assert_eq!(config.analysis.cpp_standard, "c++23");
        assert_eq!(config.analysis.frontend, FrontendKind::Libclang);
        Ok(())
    });
}

#[test]
fn env_list_values_parse_as_arrays() {
    Jail::expect_with(|jail| {
        jail.set_env("CPPSCOPE_ANALYSIS__INCLUDE_PATHS", "[include, vendor]");

        let config: CppscopeConfig = CppscopeConfig::figment().extract()?;
        assert_eq!(config.analysis.include_paths, vec!["include", "vendor"]);
        Ok(())
    });
}
