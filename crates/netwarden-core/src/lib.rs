//! NetWarden Core - Foundation types and error handling
//!
//! This crate provides the core abstractions used throughout NetWarden:
//! - `Token`: A configuration line in its original and normalized form
//! - `Finding`: A compliance deviation (missing or additional config)
//! - `Error`: The shared error type

pub mod error;
pub mod finding;
pub mod token;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use finding::{Finding, FindingKind};
pub use token::{is_falsy, json_kind, normalize, render, Token};
