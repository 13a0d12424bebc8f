//! Output formats for compliance reports

pub mod csv;
pub mod json;
pub mod text;

pub use self::csv::{write_comparison_results, write_csv, write_device_summary};
pub use self::json::write_json;
pub use self::text::write_text;

/// Device Summary column headers
pub const DEVICE_SUMMARY_HEADERS: [&str; 3] = ["SR.No.", "hostname", "section"];

/// Comparison Results column header
pub const COMPARISON_RESULTS_HEADER: &str = "to_check";
