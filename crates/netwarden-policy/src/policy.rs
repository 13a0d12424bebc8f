//! Whitelist policy - required configuration per section

use netwarden_core::{json_kind, Error, Result, Token};
use serde_json::{Map, Value};
use thiserror::Error;

/// Field naming the required lines of a section
pub const MUST_INCLUDE: &str = "must_include";

/// Rule that applies to one policy section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRule {
    /// Every listed token must be present; anything else observed is additional
    MustInclude(Vec<Token>),
    /// No constraint; the section never produces findings
    Unconstrained,
}

impl SectionRule {
    /// Interpret a raw policy value.
    ///
    /// Only an object carrying `must_include` is a rule. Every other shape is
    /// unconstrained, which is distinct from an empty `must_include` list.
    pub fn from_value(value: &Value) -> std::result::Result<Self, RuleError> {
        let Some(required) = value.as_object().and_then(|obj| obj.get(MUST_INCLUDE)) else {
            return Ok(SectionRule::Unconstrained);
        };

        match required {
            Value::Array(items) => Ok(SectionRule::MustInclude(
                items.iter().map(Token::from_value).collect(),
            )),
            other => Err(RuleError::MustIncludeNotList {
                found: json_kind(other),
            }),
        }
    }

    pub fn is_constrained(&self) -> bool {
        matches!(self, SectionRule::MustInclude(_))
    }
}

/// A section rule whose shape cannot be interpreted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("`must_include` must be a list, found {found}")]
    MustIncludeNotList { found: &'static str },
}

/// Whitelist policy: section name to rule, in document order
#[derive(Debug, Clone, Default)]
pub struct Policy {
    sections: Map<String, Value>,
}

impl Policy {
    /// Build a policy from a parsed JSON document.
    ///
    /// The document must be an object; anything else is a caller error.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(sections) => Ok(Self { sections }),
            other => Err(Error::InvalidPolicy {
                found: json_kind(&other),
            }),
        }
    }

    /// Parse a policy from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Resolve the rule for a section. Unknown sections are unconstrained.
    pub fn resolve(&self, section: &str) -> std::result::Result<SectionRule, RuleError> {
        match self.sections.get(section) {
            Some(value) => SectionRule::from_value(value),
            None => Ok(SectionRule::Unconstrained),
        }
    }

    /// Section names in document order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(|s| s.as_str())
    }

    /// Raw section values in document order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
