//! CAP Validator
//!
//! Validates Common Alerting Protocol alerts, and the Atom, RSS and EDXL-DE
//! feeds that carry them, against the CAP structural rules and optional
//! jurisdiction profiles. Every finding is anchored to a line of the input.
//!
//! This library provides:
//! - Document classification and alert extraction
//! - Structural and profile rule checking
//! - Path-to-line location tracking
//! - A CLI and an LSP front-end

pub mod cap;
pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod location;
pub mod lsp;
pub mod profile;
pub mod reason;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use crate::core::{ValidationResult, Validator};
pub use document::DocumentKind;
pub use error::CapError;
pub use profile::{Profile, ProfileRegistry};
pub use reason::{Level, Reason, Reasons};
