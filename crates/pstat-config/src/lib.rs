//! pstat configuration loading and validation.
//!
//! This crate provides:
//! - A typed `Settings` struct for display and series generation
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{resolve_config, resolve_config_with, ConfigSource, ResolvedConfig};
pub use settings::Settings;
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "PSTAT_CONFIG";
