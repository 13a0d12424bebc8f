//! Section differ - missing and additional config for one section

use crate::error::SectionError;
use netwarden_core::{is_falsy, json_kind, Finding, Token};
use serde_json::Value;
use std::collections::HashSet;

/// Findings for one section, missing before additional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionDiff {
    pub missing: Vec<Finding>,
    pub additional: Vec<Finding>,
}

impl SectionDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.additional.is_empty()
    }

    /// Missing findings followed by additional findings
    pub fn into_findings(self) -> Vec<Finding> {
        let mut findings = self.missing;
        findings.extend(self.additional);
        findings
    }
}

/// Coerce an observed section value into tokens.
///
/// Lists keep their order with falsy entries dropped, a truthy scalar is a
/// one-line section, and an absent or falsy value is empty. Objects have no
/// line interpretation and are rejected.
pub fn observed_tokens(observed: Option<&Value>) -> Result<Vec<Token>, SectionError> {
    match observed {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter(|item| !is_falsy(item))
            .map(Token::from_value)
            .collect()),
        Some(Value::Object(_)) => Err(SectionError::UnexpectedObserved { found: "object" }),
        Some(scalar) if is_falsy(scalar) => Ok(Vec::new()),
        Some(scalar) => Ok(vec![Token::from_value(scalar)]),
    }
}

/// Compare required tokens against observed tokens.
///
/// Membership is exact equality of normalized forms. Missing findings follow
/// policy order and are emitted once per policy entry; additional findings
/// follow observed order and are emitted once per observed occurrence.
pub fn diff_tokens(
    required: &[Token],
    observed: &[Token],
    hostname: &str,
    section: &str,
) -> SectionDiff {
    let observed_set: HashSet<&str> = observed.iter().map(|t| t.normalized.as_str()).collect();
    let required_set: HashSet<&str> = required.iter().map(|t| t.normalized.as_str()).collect();

    let missing = required
        .iter()
        .filter(|t| !t.is_empty() && !observed_set.contains(t.normalized.as_str()))
        .map(|t| Finding::missing(hostname, section, t.raw.as_str()))
        .collect();

    let additional = observed
        .iter()
        .filter(|t| !t.is_empty() && !t.is_non_semantic())
        .filter(|t| !required_set.contains(t.normalized.as_str()))
        .map(|t| Finding::additional(hostname, section, t.raw.as_str()))
        .collect();

    SectionDiff {
        missing,
        additional,
    }
}

/// Diff one section given its required tokens and raw observed value
pub fn diff_section(
    required: &[Token],
    observed: Option<&Value>,
    hostname: &str,
    section: &str,
) -> Result<SectionDiff, SectionError> {
    let observed = observed_tokens(observed)?;
    Ok(diff_tokens(required, &observed, hostname, section))
}

/// Shape name of an observed value, for diagnostics
pub fn observed_kind(observed: Option<&Value>) -> &'static str {
    observed.map(json_kind).unwrap_or("absent")
}
