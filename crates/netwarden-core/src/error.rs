//! Error types for NetWarden

use thiserror::Error;

/// Result type alias using NetWarden Error
pub type Result<T> = std::result::Result<T, Error>;

/// NetWarden error types
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid document {path}: {message}")]
    InvalidDocument { path: String, message: String },

    #[error("Policy must be a JSON object keyed by section name, found {found}")]
    InvalidPolicy { found: &'static str },

    #[error("Snapshot must be a JSON object keyed by hostname, found {found}")]
    InvalidSnapshot { found: &'static str },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    // === Report Errors ===
    #[error("Report error: {0}")]
    Report(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::FileNotFound { .. } => "FILE_NOT_FOUND",
            Error::InvalidDocument { .. } => "INVALID_DOCUMENT",
            Error::InvalidPolicy { .. } => "INVALID_POLICY",
            Error::InvalidSnapshot { .. } => "INVALID_SNAPSHOT",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::InvalidConfig { .. } => "INVALID_CONFIG",
            Error::Report(_) => "REPORT_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}
