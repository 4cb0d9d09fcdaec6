//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<RunConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<RunConfig> {
    let config: RunConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: RunConfig) -> RunConfig {
    // Files on the command line replace the configured list
    if !cli.files.is_empty() {
        config.files = cli.files.clone();
    }

    if let Some(ref op) = cli.op {
        config.op = op.clone();
    }
    if let Some(col) = cli.col {
        config.col = col;
    }
    if let Some(ref delimiter) = cli.delimiter {
        config.delimiter = delimiter.clone();
    }
    if let Some(output) = cli.output {
        config.output = output.into();
    }

    config
}

/// Build the run configuration from the CLI, loading the config file if given
pub fn load_config(cli: &Cli) -> Result<RunConfig> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => RunConfig::default(),
    };

    Ok(merge_cli_with_config(cli, base))
}
