//! NetWarden Common - Shared utilities: logging and configuration
//!
//! This crate provides common functionality used by the NetWarden binary and libraries.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigBuilder, ReportFormat};
pub use logging::{init_logging, LogConfig, LogFormat};
