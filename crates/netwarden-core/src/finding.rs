//! Finding definitions - compliance deviations discovered during comparison

use serde::{Deserialize, Serialize};

/// Kind of compliance deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// A required line is absent from the device
    Missing,
    /// A present line is not on the whitelist
    Additional,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::Missing => "missing",
            FindingKind::Additional => "additional",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reported deviation tied to a hostname, section and token.
///
/// Findings carry no identity beyond their content; a list of findings may
/// legitimately hold duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Finding {
    /// Required token (original, un-normalized form) not observed on the device
    Missing {
        hostname: String,
        section: String,
        token: String,
    },
    /// Observed token (original, un-normalized form) not present in the policy
    Additional {
        hostname: String,
        section: String,
        token: String,
    },
}

impl Finding {
    pub fn missing(
        hostname: impl Into<String>,
        section: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Finding::Missing {
            hostname: hostname.into(),
            section: section.into(),
            token: token.into(),
        }
    }

    pub fn additional(
        hostname: impl Into<String>,
        section: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Finding::Additional {
            hostname: hostname.into(),
            section: section.into(),
            token: token.into(),
        }
    }

    pub fn kind(&self) -> FindingKind {
        match self {
            Finding::Missing { .. } => FindingKind::Missing,
            Finding::Additional { .. } => FindingKind::Additional,
        }
    }

    pub fn hostname(&self) -> &str {
        match self {
            Finding::Missing { hostname, .. } | Finding::Additional { hostname, .. } => hostname,
        }
    }

    pub fn section(&self) -> &str {
        match self {
            Finding::Missing { section, .. } | Finding::Additional { section, .. } => section,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Finding::Missing { token, .. } | Finding::Additional { token, .. } => token,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Finding::Missing { .. })
    }

    /// The `to_check` line consumed by report renderers.
    pub fn to_check_line(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} config: {}:{}",
            self.kind(),
            self.token(),
            self.hostname()
        )
    }
}
