//! Per-section and per-device processing errors
//!
//! None of these abort an audit run; they are collected next to the findings.

use netwarden_policy::RuleError;
use thiserror::Error;

/// Why a single section could not be compared
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    #[error("invalid rule: {0}")]
    InvalidRule(#[from] RuleError),

    #[error("observed config must be a list or a single value, found {found}")]
    UnexpectedObserved { found: &'static str },

    #[error("device entry must map section names to config, found {found}")]
    InvalidDevice { found: &'static str },
}

impl SectionError {
    pub fn code(&self) -> &'static str {
        match self {
            SectionError::InvalidRule(_) => "INVALID_RULE",
            SectionError::UnexpectedObserved { .. } => "UNEXPECTED_OBSERVED",
            SectionError::InvalidDevice { .. } => "INVALID_DEVICE",
        }
    }
}

/// A section that failed to compare on one device
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error processing section '{section}' on {hostname}: {cause}")]
pub struct SectionProcessingError {
    pub hostname: String,
    pub section: String,
    #[source]
    pub cause: SectionError,
}

impl SectionProcessingError {
    pub fn new(hostname: impl Into<String>, section: impl Into<String>, cause: SectionError) -> Self {
        Self {
            hostname: hostname.into(),
            section: section.into(),
            cause,
        }
    }
}

/// A snapshot entry that is not a section map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error processing device: {hostname}")]
pub struct DeviceError {
    pub hostname: String,
    pub found: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_error_messages() {
        let err = SectionProcessingError::new(
            "sw01",
            "snmp",
            SectionError::InvalidRule(RuleError::MustIncludeNotList { found: "number" }),
        );
        assert_eq!(
            err.to_string(),
            "error processing section 'snmp' on sw01: invalid rule: `must_include` must be a list, found number"
        );
        assert_eq!(err.cause.code(), "INVALID_RULE");
    }

    #[test]
    fn test_device_error_is_a_to_check_line() {
        let err = DeviceError {
            hostname: String::from("edge-fw01"),
            found: "array",
        };
        assert_eq!(err.to_string(), "error processing device: edge-fw01");
    }
}
