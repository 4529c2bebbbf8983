//! Configuration loading, CLI overrides and validation.
//!
//! Files are selected by extension: `json`/`jsonc` (comments allowed),
//! `yaml`/`yml`, or `toml`. Every section is optional; an empty file yields
//! the in-memory backend with default validator and logging settings.

mod cli;
mod defaults;
mod loader;
mod types;
mod validate;

pub use cli::{CliOverrides, apply_overrides};
pub use loader::{ConfigError, ConfigFormat, load_config, parse_config};
pub use types::*;
pub use validate::validate_config;
