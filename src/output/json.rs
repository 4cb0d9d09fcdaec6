//! JSON output formatting
//!
//! One object per run, on a single line:
//!
//! ```text
//! {"operation":"sum","records":6,"files":2,"value":150.0}
//! ```
//!
//! Non-finite values (the average of nothing) are written as `null`.

use crate::coordinator::Summary;
use crate::Result;
use anyhow::Context;
use std::io::Write;

/// Serialize a summary to a compact JSON string
pub fn to_json(summary: &Summary) -> Result<String> {
    serde_json::to_string(summary).context("Failed to serialize summary")
}

/// Write the summary as a single JSON line
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> Result<()> {
    writeln!(out, "{}", to_json(summary)?)?;
    Ok(())
}
