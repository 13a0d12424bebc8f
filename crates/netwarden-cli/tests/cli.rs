use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    tmp: TempDir,
    snapshot: PathBuf,
    policy: PathBuf,
}

impl Fixture {
    fn new(snapshot: &str, policy: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let snapshot_path = tmp.path().join("output.json");
        let policy_path = tmp.path().join("white_list.json");
        fs::write(&snapshot_path, snapshot).expect("write snapshot");
        fs::write(&policy_path, policy).expect("write policy");

        Self {
            tmp,
            snapshot: snapshot_path,
            policy: policy_path,
        }
    }

    fn dir(&self) -> &Path {
        self.tmp.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("netwarden").unwrap();
        cmd.current_dir(self.dir())
            .env_remove("NETWARDEN_SNAPSHOT")
            .env_remove("NETWARDEN_POLICY")
            .env_remove("NETWARDEN_OUTPUT_DIR")
            .env_remove("NETWARDEN_REPORT_FORMATS")
            .env_remove("NETWARDEN_FAIL_ON_FINDINGS")
            .env_remove("RUST_LOG")
            .arg("--log-level")
            .arg("warn")
            .arg("--snapshot")
            .arg(&self.snapshot)
            .arg("--policy")
            .arg(&self.policy);
        cmd
    }
}

const NTP_POLICY: &str = r#"{"ntp": {"must_include": ["ntp server 10.0.0.1"]}, "vty": {"must_include": []}}"#;

#[test]
fn text_report_lists_findings() {
    let fx = Fixture::new(
        r##"{
            "sw01": {"ntp": [], "vty": ["!", "#disabled"]},
            "sw02": {"ntp": ["  ntp server 10.0.0.1  ", "ntp server 10.0.0.9"]}
        }"##,
        NTP_POLICY,
    );

    fx.cmd()
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout("missing config: ntp server 10.0.0.1:sw01\nadditional config: ntp server 10.0.0.9:sw02\n");
}

#[test]
fn csv_report_written_to_output_dir() {
    let fx = Fixture::new(r#"{"sw01": {"ntp": [], "hostname": "sw01"}}"#, NTP_POLICY);
    let out = fx.dir().join("reports");

    fx.cmd()
        .arg("--output-dir")
        .arg(&out)
        .args(["--format", "csv"])
        .assert()
        .success();

    let summary = fs::read_to_string(out.join("config_comparison_device_summary.csv")).unwrap();
    assert_eq!(
        summary.lines().collect::<Vec<_>>(),
        vec!["SR.No.,hostname,section", "1,sw01,ntp", "2,sw01,hostname"]
    );

    let results = fs::read_to_string(out.join("config_comparison_comparison_results.csv")).unwrap();
    assert_eq!(
        results.lines().collect::<Vec<_>>(),
        vec!["to_check", "missing config: ntp server 10.0.0.1:sw01"]
    );
}

#[test]
fn json_report_includes_errors() {
    let fx = Fixture::new(
        r#"{"sw01": {"ntp": {"server": "10.0.0.1"}}, "fw01": ["unreachable"]}"#,
        NTP_POLICY,
    );

    fx.cmd()
        .arg("--output-dir")
        .arg(fx.dir())
        .args(["--format", "json", "--file-stem", "audit"])
        .assert()
        .success();

    let doc: Value =
        serde_json::from_str(&fs::read_to_string(fx.dir().join("audit.json")).unwrap()).unwrap();
    assert_eq!(doc["errors"][0]["section"], "ntp");
    assert_eq!(doc["errors"][1]["hostname"], "fw01");
    assert_eq!(doc["comparison_results"][0], "error processing device: fw01");
}

#[test]
fn fail_on_findings_sets_exit_status() {
    let fx = Fixture::new(r#"{"sw01": {"ntp": []}}"#, NTP_POLICY);

    fx.cmd()
        .args(["--format", "text", "--fail-on-findings"])
        .assert()
        .code(2)
        .stdout(contains("missing config: ntp server 10.0.0.1:sw01"));
}

#[test]
fn clean_audit_passes_with_fail_on_findings() {
    let fx = Fixture::new(r#"{"sw01": {"ntp": ["ntp server 10.0.0.1"]}}"#, NTP_POLICY);

    fx.cmd()
        .args(["--format", "text", "--fail-on-findings"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn missing_policy_file_fails() {
    let fx = Fixture::new(r#"{"sw01": {}}"#, NTP_POLICY);
    fs::remove_file(&fx.policy).unwrap();

    fx.cmd()
        .args(["--format", "text"])
        .assert()
        .failure()
        .stderr(contains("File not found"));
}

#[test]
fn non_object_policy_fails() {
    let fx = Fixture::new(r#"{"sw01": {}}"#, r#"["ntp"]"#);

    fx.cmd()
        .args(["--format", "text"])
        .assert()
        .failure()
        .stderr(contains("Policy must be a JSON object"));
}

#[test]
fn config_file_supplies_defaults() {
    let fx = Fixture::new(r#"{"sw01": {"ntp": []}}"#, NTP_POLICY);
    let config_path = fx.dir().join("netwarden.toml");
    fs::write(&config_path, "[report]\nformats = [\"text\"]\n").unwrap();

    fx.cmd()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(contains("missing config: ntp server 10.0.0.1:sw01"));
}
