//! CLI argument parsing using clap

use crate::config::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// `<op> of <N> recs => <value>`
    Text,
    /// Single-line JSON object
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// colstat - aggregate one column across delimited text files
///
/// Every file is processed concurrently and the selected column is combined into
/// a single result. Options left unset fall back to the config file (if any),
/// then to the built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "colstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Files to process
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Operation to execute: sum, avg, min, max [default: sum]
    #[arg(long)]
    pub op: Option<String>,

    /// 1-based column to aggregate [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub col: Option<i64>,

    /// Field delimiter, a single character [default: ,]
    #[arg(long, allow_hyphen_values = true)]
    pub delimiter: Option<String>,

    /// Result format [default: text]
    #[arg(long, value_enum)]
    pub output: Option<OutputArg>,

    /// TOML configuration file
    #[arg(short = 'c', long, env = "COLSTAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
