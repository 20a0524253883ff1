//! # cppscope-config
//!
//! Layered configuration loading for cppscope using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CPPSCOPE_*` prefix, `__` as separator)
//! 2. Project-level `.cppscope/config.toml`
//! 3. User-level `~/.config/cppscope/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CPPSCOPE_ANALYSIS__CPP_STANDARD` -> `analysis.cpp_standard`,
//! `CPPSCOPE_PROJECT__WORKERS` -> `project.workers`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cppscope_config::CppscopeConfig;
//!
//! let config = CppscopeConfig::load_with_dotenv().expect("config");
//! println!("standard: {}", config.analysis.cpp_standard);
//! ```

mod analysis;
mod error;
mod project;

pub use analysis::{AnalysisConfig, FrontendKind, SUPPORTED_STANDARDS};
pub use error::ConfigError;
pub use project::ProjectConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CppscopeConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub project: ProjectConfig,
}

impl CppscopeConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load with an explicit TOML file layered above the project-local file
    /// and below the environment.
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub fn load_with_file(path: &Path) -> Result<Self, ConfigError> {
        let figment = Self::file_layers()
            .merge(Toml::file(path))
            .merge(Self::env_provider());
        Self::from_figment(figment)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::file_layers().merge(Self::env_provider())
    }

    /// Extract and validate.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()
    }

    fn file_layers() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".cppscope/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed("CPPSCOPE_").split("__")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cppscope").join("config.toml"))
    }
}
