//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//!
//! A [`RunConfig`] is the raw, user-facing description of a run: it can come
//! from the command line, a TOML file, or both. [`validator::validate_config`]
//! turns it into a [`RunPlan`] whose fields are typed and checked; only a plan
//! is ever handed to the coordinator.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::parser::Delimiter;
use crate::stats::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Input files
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Operation name (sum, avg, min, max)
    #[serde(default = "default_op")]
    pub op: String,
    /// 1-based column to aggregate (checked by the validator)
    #[serde(default = "default_col")]
    pub col: i64,
    /// Field delimiter (exactly one character)
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Result format
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_op() -> String {
    Operation::default().name().to_string()
}

fn default_col() -> i64 {
    1
}

fn default_delimiter() -> String {
    Delimiter::default().to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            op: default_op(),
            col: default_col(),
            delimiter: default_delimiter(),
            output: OutputFormat::default(),
        }
    }
}

impl RunConfig {
    /// Configuration for `files` with every option at its default
    pub fn with_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Result output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<op> of <N> recs => <value>`
    #[default]
    Text,
    /// Single-line JSON object
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Validated, typed plan for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    /// Input files (never empty)
    pub files: Vec<PathBuf>,
    /// Aggregation to apply
    pub operation: Operation,
    /// 1-based column (never 0)
    pub column: usize,
    /// Field delimiter
    pub delimiter: Delimiter,
}
