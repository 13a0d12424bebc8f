//! NetWarden Report - renders audit results for review
//!
//! Two tables are produced from an audit run:
//! - Device Summary: one row per (hostname, section) reported by the collector
//! - Comparison Results: one `to_check` line per finding or failed device
//!
//! They can be written as CSV files, a JSON document, or plain text.
//!
//! # Example
//!
//! ```no_run
//! use netwarden_common::ReportFormat;
//! use netwarden_report::{ComplianceReport, ReportWriter};
//! # fn run(result: &netwarden_compare::AuditResult) -> netwarden_core::Result<()> {
//! let report = ComplianceReport::from_audit(result);
//! let writer = ReportWriter::new("reports", "config_comparison");
//! let written = writer.write(&report, &[ReportFormat::Csv], &mut std::io::stdout())?;
//! println!("Wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

pub mod formats;

use chrono::{DateTime, Utc};
use netwarden_common::ReportFormat;
use netwarden_compare::{AuditResult, DeviceInventory};
use netwarden_core::{Finding, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Device Summary row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "SR.No.")]
    pub sr_no: usize,
    pub hostname: String,
    pub section: String,
}

/// Processing error as rendered in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub hostname: String,
    /// Absent for device-level errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub code: String,
    pub message: String,
}

/// Report totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub devices: usize,
    pub policy_sections: usize,
    pub summary_rows: usize,
    pub missing: usize,
    pub additional: usize,
    pub errors: usize,
}

/// Renderer-facing view of an audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Report generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Device Summary table
    pub device_summary: Vec<SummaryRow>,
    /// Comparison Results table (`to_check` column)
    pub comparison_results: Vec<String>,
    /// Structured findings behind the `to_check` lines
    pub findings: Vec<Finding>,
    /// Section and device processing errors
    pub errors: Vec<ErrorRecord>,
    /// Totals
    pub totals: ReportTotals,
}

impl ComplianceReport {
    /// Build the report tables from an audit result
    pub fn from_audit(result: &AuditResult) -> Self {
        let device_summary: Vec<SummaryRow> = result
            .inventory()
            .into_iter()
            .flat_map(|DeviceInventory { hostname, sections }| {
                sections
                    .into_iter()
                    .map(move |section| (hostname.clone(), section))
            })
            .enumerate()
            .map(|(i, (hostname, section))| SummaryRow {
                sr_no: i + 1,
                hostname,
                section,
            })
            .collect();

        let mut errors = Vec::new();
        for device in &result.devices {
            if let Some(err) = &device.device_error {
                errors.push(ErrorRecord {
                    hostname: err.hostname.clone(),
                    section: None,
                    code: String::from("INVALID_DEVICE"),
                    message: format!("device entry is {}, expected an object", err.found),
                });
            }
            for err in &device.errors {
                errors.push(ErrorRecord {
                    hostname: err.hostname.clone(),
                    section: Some(err.section.clone()),
                    code: err.cause.code().to_string(),
                    message: err.cause.to_string(),
                });
            }
        }

        let totals = ReportTotals {
            devices: result.summary.devices,
            policy_sections: result.summary.policy_sections,
            summary_rows: device_summary.len(),
            missing: result.summary.missing,
            additional: result.summary.additional,
            errors: errors.len(),
        };

        Self {
            generated_at: Utc::now(),
            device_summary,
            comparison_results: result.to_check_lines(),
            findings: result.findings().cloned().collect(),
            errors,
            totals,
        }
    }
}

/// Writes reports into an output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    file_stem: String,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the report in every requested format.
    ///
    /// File formats land in the output directory; text goes to `out`.
    /// Returns the paths of the files written.
    pub fn write(
        &self,
        report: &ComplianceReport,
        formats: &[ReportFormat],
        out: &mut impl Write,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for format in formats {
            match format {
                ReportFormat::Csv => {
                    std::fs::create_dir_all(&self.output_dir)?;
                    written.extend(formats::csv::write_csv(
                        report,
                        &self.output_dir,
                        &self.file_stem,
                    )?);
                }
                ReportFormat::Json => {
                    std::fs::create_dir_all(&self.output_dir)?;
                    written.push(formats::json::write_json(
                        report,
                        &self.output_dir,
                        &self.file_stem,
                    )?);
                }
                ReportFormat::Text => formats::text::write_text(report, out)?,
            }
        }

        for path in &written {
            info!("Report saved: {}", path.display());
        }
        Ok(written)
    }
}
