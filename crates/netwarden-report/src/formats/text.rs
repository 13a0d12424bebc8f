//! Plain-text output - one `to_check` line per row

use crate::ComplianceReport;
use netwarden_core::Result;
use std::io::Write;

pub fn write_text(report: &ComplianceReport, out: &mut impl Write) -> Result<()> {
    for line in &report.comparison_results {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
