//! NetWarden Policy - Whitelist policy model and loader
//!
//! This crate provides:
//! - `Policy`: Section-keyed whitelist document, iterated in document order
//! - `SectionRule`: The resolved rule for one section (`must_include` or unconstrained)
//! - Loaders that read and validate JSON input documents

pub mod loader;
pub mod policy;

pub use loader::{load_policy_file, read_json_document};
pub use policy::{Policy, RuleError, SectionRule, MUST_INCLUDE};
