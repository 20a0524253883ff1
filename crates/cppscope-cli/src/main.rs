use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cppscope_config::CppscopeConfig;
use cppscope_parser::Analyzer;

mod cli;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("cppscope error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    if let Some(kind) = cli.schema {
        return output::output(&output::schema(kind), cli.pretty);
    }

    let mut config = load_config(cli.config.as_ref())?;
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;

    let analyzer = Analyzer::from_config(config.analysis.clone())
        .context("failed to initialize analyzer")?;
    tracing::debug!(
        files = cli.files.len(),
        frontend = analyzer.frontend_name(),
        standard = %config.analysis.cpp_standard,
        "starting analysis"
    );

    if let [file] = cli.files.as_slice() {
        let document = analyzer
            .analyze_file(file)
            .with_context(|| format!("failed to analyze {}", file.display()))?;
        return output::output(&document, cli.pretty);
    }

    let project_root = std::env::current_dir().context("failed to read current directory")?;
    let project = analyzer
        .analyze_project(&project_root, &cli.files, config.project.workers)
        .context("project analysis failed")?;
    output::output(&project, cli.pretty)
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<CppscopeConfig> {
    match path {
        Some(path) => CppscopeConfig::load_with_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => CppscopeConfig::load_with_dotenv().context("failed to load configuration"),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CPPSCOPE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
