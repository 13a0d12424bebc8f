//! Comparator driver - compares one device against every policy section

use crate::differ::{diff_section, observed_kind, SectionDiff};
use crate::error::{SectionError, SectionProcessingError};
use crate::snapshot::DeviceSnapshot;
use netwarden_core::Finding;
use netwarden_policy::{Policy, SectionRule};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Outcome of comparing one device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceComparison {
    /// Findings per section in policy order, missing before additional
    pub findings: Vec<Finding>,
    /// Sections that could not be compared
    pub errors: Vec<SectionProcessingError>,
    /// Number of policy sections that carried a rule
    pub sections_checked: usize,
}

impl DeviceComparison {
    pub fn missing_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_missing()).count()
    }

    pub fn additional_count(&self) -> usize {
        self.findings.len() - self.missing_count()
    }
}

/// Compare a device's snapshot against the policy.
///
/// Iteration is driven by the policy: snapshot sections the policy does not
/// name are never compared, and an absent device or section counts as zero
/// observed lines. A failing section is recorded and the remaining sections
/// are still compared.
pub fn compare_device(snapshot: &DeviceSnapshot, policy: &Policy, hostname: &str) -> DeviceComparison {
    let mut comparison = DeviceComparison::default();

    let sections = match snapshot.device_sections(hostname) {
        Ok(sections) => sections,
        Err(device_error) => {
            // Every constrained section fails the same way
            for (section, _) in policy.sections() {
                if let Ok(SectionRule::Unconstrained) = policy.resolve(section) {
                    continue;
                }
                let error = SectionProcessingError::new(
                    hostname,
                    section,
                    SectionError::InvalidDevice {
                        found: device_error.found,
                    },
                );
                warn!("{}", error);
                comparison.errors.push(error);
            }
            return comparison;
        }
    };

    for (section, rule_value) in policy.sections() {
        match compare_section(sections, section, rule_value, hostname) {
            Ok(Some(diff)) => {
                comparison.sections_checked += 1;
                comparison.findings.extend(diff.into_findings());
            }
            Ok(None) => {
                debug!("Section {} is unconstrained, skipping", section);
            }
            Err(cause) => {
                let error = SectionProcessingError::new(hostname, section, cause);
                warn!("{}", error);
                comparison.errors.push(error);
            }
        }
    }

    comparison
}

/// Compare one section; `Ok(None)` when the policy places no rule on it.
fn compare_section(
    sections: Option<&Map<String, Value>>,
    section: &str,
    rule_value: &Value,
    hostname: &str,
) -> Result<Option<SectionDiff>, SectionError> {
    let required = match SectionRule::from_value(rule_value)? {
        SectionRule::MustInclude(required) => required,
        SectionRule::Unconstrained => return Ok(None),
    };

    let observed = sections.and_then(|s| s.get(section));
    let diff = diff_section(&required, observed, hostname, section)?;

    debug!(
        "{} / {}: {} required, observed {}, {} missing, {} additional",
        hostname,
        section,
        required.len(),
        observed_kind(observed),
        diff.missing.len(),
        diff.additional.len()
    );

    Ok(Some(diff))
}

#[cfg(test)]
mod tests {
    use super::*;
    use netwarden_policy::RuleError;
    use serde_json::json;

    fn lines(comparison: &DeviceComparison) -> Vec<String> {
        comparison.findings.iter().map(|f| f.to_check_line()).collect()
    }

    fn fixture() -> (DeviceSnapshot, Policy) {
        let snapshot = DeviceSnapshot::from_value(json!({
            "sw01": {
                "ntp": ["ntp server 10.0.0.1", "ntp server 10.0.0.9"],
                "logging": ["logging host 10.1.1.1"],
                "snmp": {"community": "public"},
                "interfaces": ["interface Gi0/1"]
            }
        }))
        .unwrap();

        let policy = Policy::from_value(json!({
            "logging": {"must_include": ["logging host 10.1.1.1", "logging trap informational"]},
            "snmp": {"must_include": ["snmp-server location DC1"]},
            "ntp": {"must_include": ["ntp server 10.0.0.1"]},
            "aaa": {"must_include": ["aaa new-model"]},
            "comments": "anything goes"
        }))
        .unwrap();

        (snapshot, policy)
    }

    #[test]
    fn test_findings_follow_policy_order() {
        let (snapshot, policy) = fixture();
        let comparison = compare_device(&snapshot, &policy, "sw01");

        assert_eq!(
            lines(&comparison),
            vec![
                "missing config: logging trap informational:sw01",
                "additional config: ntp server 10.0.0.9:sw01",
                "missing config: aaa new-model:sw01",
            ]
        );
        assert_eq!(comparison.sections_checked, 3);
        assert_eq!(comparison.missing_count(), 2);
        assert_eq!(comparison.additional_count(), 1);
    }

    #[test]
    fn test_malformed_section_is_isolated() {
        let (snapshot, policy) = fixture();
        let comparison = compare_device(&snapshot, &policy, "sw01");

        assert_eq!(comparison.errors.len(), 1);
        let error = &comparison.errors[0];
        assert_eq!(error.hostname, "sw01");
        assert_eq!(error.section, "snmp");
        assert_eq!(error.cause, SectionError::UnexpectedObserved { found: "object" });
    }

    #[test]
    fn test_sections_outside_policy_are_ignored() {
        let (snapshot, policy) = fixture();
        let comparison = compare_device(&snapshot, &policy, "sw01");
        assert!(comparison
            .findings
            .iter()
            .all(|f| f.section() != "interfaces"));
    }

    #[test]
    fn test_invalid_rule_is_recorded() {
        let snapshot = DeviceSnapshot::from_value(json!({"sw01": {"ntp": []}})).unwrap();
        let policy = Policy::from_value(json!({
            "ntp": {"must_include": "ntp server 10.0.0.1"},
            "aaa": {"must_include": ["aaa new-model"]}
        }))
        .unwrap();

        let comparison = compare_device(&snapshot, &policy, "sw01");
        assert_eq!(
            comparison.errors[0].cause,
            SectionError::InvalidRule(RuleError::MustIncludeNotList { found: "string" })
        );
        assert_eq!(lines(&comparison), vec!["missing config: aaa new-model:sw01"]);
    }

    #[test]
    fn test_absent_device_reports_only_missing() {
        let (snapshot, policy) = fixture();
        let comparison = compare_device(&snapshot, &policy, "sw99");

        assert!(comparison.errors.is_empty());
        assert_eq!(comparison.findings.len(), 5);
        assert!(comparison.findings.iter().all(|f| f.is_missing()));
    }

    #[test]
    fn test_non_object_device_fails_constrained_sections() {
        let snapshot = DeviceSnapshot::from_value(json!({"sw01": ["ntp server 10.0.0.1"]})).unwrap();
        let (_, policy) = fixture();
        let comparison = compare_device(&snapshot, &policy, "sw01");

        assert!(comparison.findings.is_empty());
        assert_eq!(comparison.errors.len(), 4);
        assert!(comparison
            .errors
            .iter()
            .all(|e| e.cause == SectionError::InvalidDevice { found: "array" }));
    }

    #[test]
    fn test_comparison_is_deterministic() {
        let (snapshot, policy) = fixture();
        let first = compare_device(&snapshot, &policy, "sw01");
        let second = compare_device(&snapshot, &policy, "sw01");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_policy() {
        let (snapshot, _) = fixture();
        let policy = Policy::from_value(json!({})).unwrap();
        let comparison = compare_device(&snapshot, &policy, "sw01");
        assert_eq!(comparison, DeviceComparison::default());
    }
}
