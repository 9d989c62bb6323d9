//! Core building blocks shared by every command
//!
//! - **config**: Config file, command-line overrides, and resolved settings
//! - **context**: Per-invocation workspace context
//! - **error**: Error types with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;
