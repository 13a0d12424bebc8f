//! CSV output - one file per report table

use super::{COMPARISON_RESULTS_HEADER, DEVICE_SUMMARY_HEADERS};
use crate::ComplianceReport;
use csv::Writer;
use netwarden_core::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write both tables as `<stem>_device_summary.csv` and `<stem>_comparison_results.csv`
pub fn write_csv(report: &ComplianceReport, dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    let summary_path = dir.join(format!("{}_device_summary.csv", stem));
    let results_path = dir.join(format!("{}_comparison_results.csv", stem));

    let file = std::fs::File::create(&summary_path)?;
    write_device_summary(report, file)?;
    debug!(
        "Wrote {} device summary rows to {}",
        report.device_summary.len(),
        summary_path.display()
    );

    let file = std::fs::File::create(&results_path)?;
    write_comparison_results(report, file)?;
    debug!(
        "Wrote {} comparison results to {}",
        report.comparison_results.len(),
        results_path.display()
    );

    Ok(vec![summary_path, results_path])
}

/// Device Summary table; the header is written even when there are no rows
pub fn write_device_summary(report: &ComplianceReport, out: impl Write) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(DEVICE_SUMMARY_HEADERS).map_err(csv_error)?;

    for row in &report.device_summary {
        writer
            .write_record([
                row.sr_no.to_string().as_str(),
                row.hostname.as_str(),
                row.section.as_str(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

/// Comparison Results table; the header is written even when there are no rows
pub fn write_comparison_results(report: &ComplianceReport, out: impl Write) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record([COMPARISON_RESULTS_HEADER]).map_err(csv_error)?;

    for line in &report.comparison_results {
        writer.write_record([line.as_str()]).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> Error {
    Error::Report(format!("CSV write failed: {}", e))
}
