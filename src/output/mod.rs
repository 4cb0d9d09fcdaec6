//! Result output
//!
//! Renders a [`Summary`](crate::coordinator::Summary) as a single line in the
//! configured format. Nothing else is ever written to standard output.

pub mod json;
pub mod text;

use crate::config::OutputFormat;
use crate::coordinator::Summary;
use crate::Result;
use std::io::Write;

/// Write `summary` to `out` as one line in `format`
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => text::write_summary(out, summary),
        OutputFormat::Json => json::write_summary(out, summary),
    }
}
