//! Core constants shared across routerrules crates.
//!
//! This crate provides:
//! - Rule field bounds and reserved address keywords
//! - Default configuration values
//! - Error kind labels for logging and metrics

pub mod defaults;
pub mod errors;

pub use defaults::*;
pub use errors::*;

/// Project name.
pub const PROJECT_NAME: &str = "routerrules";
/// Project version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
