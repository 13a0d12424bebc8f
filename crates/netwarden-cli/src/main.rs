//! NetWarden - network device configuration compliance auditor
//!
//! Compares a collected device snapshot against a whitelist policy and
//! writes the findings as reports.

use anyhow::{Context, Result};
use clap::Parser;
use netwarden_common::logging::{init_logging_with_config, LogConfig, LogFormat};
use netwarden_common::{Config, ReportFormat};
use netwarden_compare::{load_snapshot_file, ComplianceAuditor};
use netwarden_policy::load_policy_file;
use netwarden_report::{ComplianceReport, ReportWriter};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

/// Exit status when `--fail-on-findings` is set and the audit is not clean
const EXIT_FINDINGS: u8 = 2;

/// NetWarden configuration compliance auditor
#[derive(Parser, Debug)]
#[command(name = "netwarden")]
#[command(version)]
#[command(about = "Audit network device configuration against a whitelist policy", long_about = None)]
struct Args {
    /// Configuration file path (ignored when absent)
    #[arg(short, long, default_value = "netwarden.toml")]
    config: String,

    /// Device snapshot JSON (hostname -> section -> config lines)
    #[arg(short, long)]
    snapshot: Option<String>,

    /// Whitelist policy JSON (section -> {"must_include": [...]})
    #[arg(short, long)]
    policy: Option<String>,

    /// Directory for report files
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Report format (csv, json, text); repeat for several
    #[arg(short, long = "format", value_parser = parse_format)]
    formats: Vec<ReportFormat>,

    /// Base name for report files
    #[arg(long)]
    file_stem: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<String>,

    /// Exit with status 2 when any finding or processing error is reported
    #[arg(long)]
    fail_on_findings: bool,
}

fn parse_format(value: &str) -> std::result::Result<ReportFormat, String> {
    value.parse().map_err(|e: netwarden_core::Error| e.to_string())
}

/// Resolve the effective configuration: file, then environment, then flags
fn load_config(args: &Args) -> Result<Config> {
    let mut config = if Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        Config::default()
    };
    config = config.merge_env()?;

    if let Some(snapshot) = &args.snapshot {
        config.input.snapshot = Some(snapshot.clone());
    }
    if let Some(policy) = &args.policy {
        config.input.policy = Some(policy.clone());
    }
    if let Some(dir) = &args.output_dir {
        config.report.output_dir = dir.clone();
    }
    if !args.formats.is_empty() {
        config.report.formats = args.formats.clone();
    }
    if let Some(stem) = &args.file_stem {
        config.report.file_stem = stem.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }
    if args.fail_on_findings {
        config.audit.fail_on_findings = true;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(&args)?;

    // Initialize logging
    let log_config = LogConfig::new()
        .level(&config.logging.level)
        .format(LogFormat::from_name(&config.logging.format));
    init_logging_with_config(log_config)?;

    info!("NetWarden {} starting", env!("CARGO_PKG_VERSION"));
    if !Path::new(&args.config).exists() {
        info!("Config file {} not found, using defaults", args.config);
    }

    let Some(snapshot_path) = config.input.snapshot.clone() else {
        anyhow::bail!("no snapshot given: pass --snapshot or set input.snapshot / NETWARDEN_SNAPSHOT");
    };
    let Some(policy_path) = config.input.policy.clone() else {
        anyhow::bail!("no policy given: pass --policy or set input.policy / NETWARDEN_POLICY");
    };

    // Load both documents before any comparison starts
    let (snapshot, policy) = tokio::try_join!(
        load_snapshot_file(&snapshot_path),
        load_policy_file(&policy_path)
    )
    .context("failed to load audit inputs")?;

    let mut auditor = ComplianceAuditor::new(policy);
    let result = auditor.run_audit(&snapshot);

    let report = ComplianceReport::from_audit(&result);
    let writer = ReportWriter::new(&config.report.output_dir, &config.report.file_stem);
    writer
        .write(&report, &config.report.formats, &mut std::io::stdout().lock())
        .context("failed to write reports")?;

    info!(
        "Device summary: {} entries; comparison results: {} ({} missing, {} additional, {} errors)",
        report.totals.summary_rows,
        report.comparison_results.len(),
        report.totals.missing,
        report.totals.additional,
        report.totals.errors
    );

    if config.audit.fail_on_findings && !result.is_clean() {
        return Ok(ExitCode::from(EXIT_FINDINGS));
    }
    Ok(ExitCode::SUCCESS)
}
