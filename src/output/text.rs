//! Human-readable text output

use crate::coordinator::Summary;
use crate::Result;
use std::io::Write;

/// Format a summary as `<op> of <N> recs => <value>`
///
/// The value always carries exactly two fractional digits.
pub fn format_summary(summary: &Summary) -> String {
    summary.to_string()
}

/// Write the summary line, newline-terminated
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> Result<()> {
    writeln!(out, "{}", format_summary(summary))?;
    Ok(())
}
