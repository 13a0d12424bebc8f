//! Configuration management for NetWarden

use netwarden_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input document locations
    #[serde(default)]
    pub input: InputConfig,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Audit behaviour
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        debug!("Loading configuration from {}", path.display());
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Merge with environment variables (NETWARDEN_ prefix)
    pub fn merge_env(self) -> Result<Self> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Inputs
        if let Some(val) = lookup("NETWARDEN_SNAPSHOT") {
            self.input.snapshot = Some(val);
        }
        if let Some(val) = lookup("NETWARDEN_POLICY") {
            self.input.policy = Some(val);
        }

        // Report
        if let Some(val) = lookup("NETWARDEN_OUTPUT_DIR") {
            self.report.output_dir = val;
        }
        if let Some(val) = lookup("NETWARDEN_REPORT_FORMATS") {
            self.report.formats = ReportFormat::parse_list(&val)?;
        }

        // Audit
        if let Some(val) = lookup("NETWARDEN_FAIL_ON_FINDINGS") {
            self.audit.fail_on_findings = parse_bool("NETWARDEN_FAIL_ON_FINDINGS", &val)?;
        }

        // Logging
        if let Some(val) = lookup("NETWARDEN_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("NETWARDEN_LOG_FORMAT") {
            self.logging.format = val;
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::InvalidConfig {
            key: key.to_string(),
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}

/// Input document locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the device snapshot JSON (hostname -> section -> lines)
    pub snapshot: Option<String>,

    /// Path to the whitelist policy JSON (section -> rule)
    pub policy: Option<String>,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Device summary and comparison results as two CSV files
    Csv,
    /// Single JSON document
    Json,
    /// `to_check` lines on stdout
    Text,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Text => "text",
        }
    }

    /// Parse a comma-separated list such as `csv,json`
    pub fn parse_list(value: &str) -> Result<Vec<Self>> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<ReportFormat>())
            .collect()
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            other => Err(Error::InvalidConfig {
                key: String::from("report.formats"),
                message: format!("unknown report format '{}'", other),
            }),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory receiving report files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Formats to emit
    #[serde(default = "default_formats")]
    pub formats: Vec<ReportFormat>,

    /// Base file name for report files
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

fn default_output_dir() -> String {
    String::from(".")
}

fn default_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Csv]
}

fn default_file_stem() -> String {
    String::from("config_comparison")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
            file_stem: default_file_stem(),
        }
    }
}

/// Audit behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Exit non-zero when any finding or processing error is produced
    #[serde(default)]
    pub fail_on_findings: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("pretty")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Builder for constructing Config
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn snapshot(mut self, path: impl Into<String>) -> Self {
        self.config.input.snapshot = Some(path.into());
        self
    }

    pub fn policy(mut self, path: impl Into<String>) -> Self {
        self.config.input.policy = Some(path.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.report.output_dir = dir.into();
        self
    }

    pub fn formats(mut self, formats: Vec<ReportFormat>) -> Self {
        self.config.report.formats = formats;
        self
    }

    pub fn fail_on_findings(mut self, fail: bool) -> Self {
        self.config.audit.fail_on_findings = fail;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
