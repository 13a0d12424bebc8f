//! Document loader - reads JSON input documents from disk

use crate::Policy;
use netwarden_core::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Read and parse a JSON document.
///
/// A missing file and malformed JSON are reported with the offending path;
/// any other filesystem failure is an IO error.
pub async fn read_json_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();

    if !tokio::fs::try_exists(path).await? {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    debug!("Reading JSON document: {}", path.display());
    let content = tokio::fs::read_to_string(path).await?;

    serde_json::from_str(&content).map_err(|e| Error::InvalidDocument {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load a whitelist policy from a JSON file
pub async fn load_policy_file(path: impl AsRef<Path>) -> Result<Policy> {
    let path = path.as_ref();
    let value = read_json_document(path).await?;
    let policy = Policy::from_value(value)?;

    info!(
        "Loaded policy with {} sections from {}",
        policy.len(),
        path.display()
    );
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectionRule;
    use std::io::Write;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_policy_file() {
        let tmp_dir = TempDir::new().unwrap();
        let policy_path = tmp_dir.path().join("white_list.json");

        let json = r#"{
            "ntp": {"must_include": ["ntp server 10.0.0.1"]},
            "logging": {"must_include": []}
        }"#;

        let mut file = std::fs::File::create(&policy_path).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let policy = load_policy_file(&policy_path).await.unwrap();
        assert_eq!(policy.len(), 2);
        assert!(policy.resolve("ntp").unwrap().is_constrained());
        assert_eq!(
            policy.resolve("logging").unwrap(),
            SectionRule::MustInclude(vec![])
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let tmp_dir = TempDir::new().unwrap();
        let err = load_policy_file(tmp_dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_unreadable_path_is_io_error() {
        let tmp_dir = TempDir::new().unwrap();
        let file = tmp_dir.path().join("white_list.json");
        std::fs::write(&file, "{}").unwrap();

        // A regular file used as a directory fails with ENOTDIR, not ENOENT
        let err = load_policy_file(file.join("nested.json")).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("broken.json");
        std::fs::write(&path, "{\"ntp\": ").unwrap();

        let err = read_json_document(&path).await.unwrap_err();
        match err {
            Error::InvalidDocument { path: p, .. } => assert!(p.ends_with("broken.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_object_policy_file() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("list.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = load_policy_file(&path).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_POLICY");
    }
}
