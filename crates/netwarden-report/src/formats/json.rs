//! JSON output - the whole report as a single document

use crate::ComplianceReport;
use netwarden_core::Result;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write the report as `<stem>.json`
pub fn write_json(report: &ComplianceReport, dir: &Path, stem: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{}.json", stem));
    let file = std::fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::audit_result;
    use serde_json::Value;

    #[test]
    fn test_json_document() {
        let tmp_dir = tempfile::TempDir::new().unwrap();
        let report = ComplianceReport::from_audit(&audit_result());

        let path = write_json(&report, tmp_dir.path(), "audit").unwrap();
        assert_eq!(path, tmp_dir.path().join("audit.json"));

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["device_summary"][0]["SR.No."], 1);
        assert_eq!(doc["device_summary"][0]["hostname"], "sw01");
        assert_eq!(
            doc["comparison_results"][0],
            "missing config: ntp server 10.0.0.1:sw01"
        );
        assert_eq!(doc["findings"][2]["kind"], "additional");
        assert_eq!(doc["errors"][0]["code"], "UNEXPECTED_OBSERVED");
        assert!(doc["errors"][1].get("section").is_none());
        assert_eq!(doc["totals"]["missing"], 2);
        assert!(doc["generated_at"].is_string());
    }
}
