//! NetWarden Compare - configuration compliance comparator
//!
//! This crate compares collected device configuration against a whitelist
//! policy:
//! - Per-section diff of required (`must_include`) and observed lines
//! - Per-device driver that isolates malformed sections
//! - Auditor that runs every device in a snapshot and summarizes the run
//!
//! # Example
//!
//! ```
//! use netwarden_compare::{compare_device, DeviceSnapshot};
//! use netwarden_policy::Policy;
//!
//! let policy = Policy::from_json(r#"{"ntp": {"must_include": ["ntp server 10.0.0.1"]}}"#).unwrap();
//! let snapshot = DeviceSnapshot::from_json(r#"{"sw01": {"ntp": []}}"#).unwrap();
//!
//! let comparison = compare_device(&snapshot, &policy, "sw01");
//! assert_eq!(
//!     comparison.findings[0].to_check_line(),
//!     "missing config: ntp server 10.0.0.1:sw01"
//! );
//! ```

pub mod auditor;
pub mod comparator;
pub mod differ;
pub mod error;
pub mod snapshot;

pub use auditor::{AuditResult, AuditSummary, ComplianceAuditor, DeviceAudit};
pub use comparator::{compare_device, DeviceComparison};
pub use differ::{diff_section, diff_tokens, observed_tokens, SectionDiff};
pub use error::{DeviceError, SectionError, SectionProcessingError};
pub use snapshot::{load_snapshot_file, DeviceInventory, DeviceSnapshot};
