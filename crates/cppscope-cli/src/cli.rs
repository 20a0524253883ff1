use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use cppscope_config::{CppscopeConfig, FrontendKind};

/// Front end selectable from the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FrontendArg {
    TreeSitter,
    Libclang,
}

impl From<FrontendArg> for FrontendKind {
    fn from(arg: FrontendArg) -> Self {
        match arg {
            FrontendArg::TreeSitter => Self::TreeSitter,
            FrontendArg::Libclang => Self::Libclang,
        }
    }
}

/// Which document type `--schema` prints.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    File,
    Project,
}

/// Top-level CLI parser for the `cppscope` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cppscope",
    version,
    about = "Extract nested scope documents from C++ source files"
)]
pub struct Cli {
    /// C++ files to analyze. One file prints a file document, several print a
    /// project document.
    #[arg(required_unless_present = "schema")]
    pub files: Vec<PathBuf>,

    /// Extra TOML config file, layered above the project config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Language standard passed as -std=
    #[arg(long = "std")]
    pub std: Option<String>,

    /// Include directory (repeatable)
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub include: Vec<String>,

    /// Macro definition NAME or NAME=VALUE (repeatable)
    #[arg(short = 'D', long = "define", value_name = "MACRO")]
    pub define: Vec<String>,

    /// Worker threads for multi-file runs (0 = one per core)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Front end that parses the files
    #[arg(long)]
    pub frontend: Option<FrontendArg>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print the JSON Schema of a document type instead of analyzing
    #[arg(long, value_name = "KIND", conflicts_with = "files")]
    pub schema: Option<SchemaKind>,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer command-line overrides on top of a loaded config.
    ///
    /// `-I` and `-D` values are appended after the configured ones.
    pub fn apply_overrides(&self, config: &mut CppscopeConfig) {
        if let Some(standard) = &self.std {
            config.analysis.cpp_standard.clone_from(standard);
        }
        config.analysis.include_paths.extend(self.include.iter().cloned());
        config.analysis.defines.extend(self.define.iter().cloned());
        if let Some(workers) = self.workers {
            config.project.workers = workers;
        }
        if let Some(frontend) = self.frontend {
            config.analysis.frontend = frontend.into();
        }
    }
}
