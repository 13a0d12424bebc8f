//! Compliance auditor - runs the comparator over every device in a snapshot

use crate::comparator::compare_device;
use crate::error::{DeviceError, SectionProcessingError};
use crate::snapshot::{DeviceInventory, DeviceSnapshot};
use netwarden_core::{Finding, FindingKind};
use netwarden_policy::Policy;
use tracing::{debug, info, warn};

/// Compliance auditor that compares device snapshots against a policy
pub struct ComplianceAuditor {
    /// Whitelist policy
    policy: Policy,
    /// Per-device results of the last run
    results: Vec<DeviceAudit>,
}

/// Audit outcome for one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAudit {
    /// Device hostname
    pub hostname: String,
    /// Sections the device reported, in snapshot order
    pub sections: Vec<String>,
    /// Findings in policy section order
    pub findings: Vec<Finding>,
    /// Sections that could not be compared
    pub errors: Vec<SectionProcessingError>,
    /// Set when the device entry itself is unusable
    pub device_error: Option<DeviceError>,
}

impl DeviceAudit {
    /// Report lines for this device: its findings, or the device error
    pub fn to_check_lines(&self) -> Vec<String> {
        match &self.device_error {
            Some(err) => vec![err.to_string()],
            None => self.findings.iter().map(Finding::to_check_line).collect(),
        }
    }
}

/// Result of a full audit run
#[derive(Debug, Clone)]
pub struct AuditResult {
    /// Per-device results in snapshot order
    pub devices: Vec<DeviceAudit>,
    /// Summary statistics
    pub summary: AuditSummary,
}

impl AuditResult {
    /// All findings, device by device
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.devices.iter().flat_map(|d| d.findings.iter())
    }

    /// All section processing errors, device by device
    pub fn section_errors(&self) -> impl Iterator<Item = &SectionProcessingError> {
        self.devices.iter().flat_map(|d| d.errors.iter())
    }

    /// All device-level errors
    pub fn device_errors(&self) -> impl Iterator<Item = &DeviceError> {
        self.devices.iter().filter_map(|d| d.device_error.as_ref())
    }

    /// Device/section inventory for well-formed devices
    pub fn inventory(&self) -> Vec<DeviceInventory> {
        self.devices
            .iter()
            .filter(|d| d.device_error.is_none())
            .map(|d| DeviceInventory {
                hostname: d.hostname.clone(),
                sections: d.sections.clone(),
            })
            .collect()
    }

    /// The `to_check` column: every finding line plus device error rows
    pub fn to_check_lines(&self) -> Vec<String> {
        self.devices.iter().flat_map(|d| d.to_check_lines()).collect()
    }

    /// True when nothing was found and nothing failed
    pub fn is_clean(&self) -> bool {
        self.summary.missing == 0
            && self.summary.additional == 0
            && self.summary.section_errors == 0
            && self.summary.device_errors == 0
    }
}

/// Summary of audit results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSummary {
    /// Devices in the snapshot
    pub devices: usize,
    /// Sections in the policy
    pub policy_sections: usize,
    /// (device, section) pairs in the snapshot inventory
    pub inventory_entries: usize,
    /// Missing findings
    pub missing: usize,
    /// Additional findings
    pub additional: usize,
    /// Sections that could not be compared
    pub section_errors: usize,
    /// Devices whose entry was unusable
    pub device_errors: usize,
}

impl AuditSummary {
    pub fn total_findings(&self) -> usize {
        self.missing + self.additional
    }
}

impl ComplianceAuditor {
    /// Create an auditor for a policy
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            results: Vec::new(),
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Compare every device in the snapshot, in snapshot order
    pub fn run_audit(&mut self, snapshot: &DeviceSnapshot) -> AuditResult {
        info!(
            "Starting compliance audit: {} devices against {} policy sections",
            snapshot.len(),
            self.policy.len()
        );

        self.results.clear();
        let mut summary = AuditSummary {
            devices: snapshot.len(),
            policy_sections: self.policy.len(),
            ..Default::default()
        };

        for hostname in snapshot.hostnames() {
            let audit = self.audit_device(snapshot, hostname);

            summary.inventory_entries += audit.sections.len();
            if audit.device_error.is_some() {
                summary.device_errors += 1;
            }
            summary.section_errors += audit.errors.len();
            for finding in &audit.findings {
                match finding.kind() {
                    FindingKind::Missing => summary.missing += 1,
                    FindingKind::Additional => summary.additional += 1,
                }
            }

            self.results.push(audit);
        }

        info!(
            "Audit complete: {} missing, {} additional, {} section errors, {} device errors",
            summary.missing, summary.additional, summary.section_errors, summary.device_errors
        );

        AuditResult {
            devices: self.results.clone(),
            summary,
        }
    }

    /// Audit a single device
    fn audit_device(&self, snapshot: &DeviceSnapshot, hostname: &str) -> DeviceAudit {
        debug!("Auditing device: {}", hostname);

        let sections = match snapshot.device_sections(hostname) {
            Ok(sections) => sections,
            Err(err) => {
                warn!(
                    "Skipping device {}: entry is {}, expected an object",
                    hostname, err.found
                );
                return DeviceAudit {
                    hostname: hostname.to_string(),
                    sections: Vec::new(),
                    findings: Vec::new(),
                    errors: Vec::new(),
                    device_error: Some(err),
                };
            }
        };

        let comparison = compare_device(snapshot, &self.policy, hostname);
        debug!(
            "Device {}: {} sections checked, {} findings, {} errors",
            hostname,
            comparison.sections_checked,
            comparison.findings.len(),
            comparison.errors.len()
        );

        DeviceAudit {
            hostname: hostname.to_string(),
            sections: sections
                .map(|s| s.keys().cloned().collect())
                .unwrap_or_default(),
            findings: comparison.findings,
            errors: comparison.errors,
            device_error: None,
        }
    }

    /// Findings of the last run for one device
    pub fn get_findings_for(&self, hostname: &str) -> Vec<&Finding> {
        self.results
            .iter()
            .filter(|d| d.hostname == hostname)
            .flat_map(|d| d.findings.iter())
            .collect()
    }

    /// Findings of the last run for one policy section
    pub fn get_findings_by_section(&self, section: &str) -> Vec<&Finding> {
        self.results
            .iter()
            .flat_map(|d| d.findings.iter())
            .filter(|f| f.section() == section)
            .collect()
    }

    /// Findings of the last run of one kind
    pub fn get_findings_by_kind(&self, kind: FindingKind) -> Vec<&Finding> {
        self.results
            .iter()
            .flat_map(|d| d.findings.iter())
            .filter(|f| f.kind() == kind)
            .collect()
    }
}
