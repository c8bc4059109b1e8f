//! Settings resolution.
//!
//! Order: `--config` path, then the `PSTAT_CONFIG` environment variable, then
//! `<config_dir>/pstat/settings.json`, then built-in defaults. A file named
//! explicitly (CLI or env) must exist; the XDG location is optional.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::settings::Settings;
use crate::validate::{ValidationError, ValidationResult};

/// Where the active settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Cli,
    Env,
    Xdg,
    Defaults,
}

/// Settings plus their provenance.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub settings: Settings,
    pub source: ConfigSource,
    pub path: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn using_defaults(&self) -> bool {
        self.source == ConfigSource::Defaults
    }
}

/// Resolve settings from the process environment.
pub fn resolve_config(cli_path: Option<&Path>) -> ValidationResult<ResolvedConfig> {
    resolve_config_with(
        cli_path,
        std::env::var_os(crate::CONFIG_ENV_VAR),
        dirs::config_dir(),
    )
}

/// Resolve settings from explicit inputs.
pub fn resolve_config_with(
    cli_path: Option<&Path>,
    env_path: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> ValidationResult<ResolvedConfig> {
    if let Some(path) = cli_path {
        return load_required(path.to_path_buf(), ConfigSource::Cli);
    }

    if let Some(value) = env_path.filter(|v| !v.is_empty()) {
        return load_required(PathBuf::from(value), ConfigSource::Env);
    }

    if let Some(dir) = config_dir {
        let path = dir.join("pstat").join("settings.json");
        if path.is_file() {
            let settings = Settings::from_file(&path)?;
            return Ok(ResolvedConfig {
                settings,
                source: ConfigSource::Xdg,
                path: Some(path),
            });
        }
    }

    Ok(ResolvedConfig {
        settings: Settings::default(),
        source: ConfigSource::Defaults,
        path: None,
    })
}

fn load_required(path: PathBuf, source: ConfigSource) -> ValidationResult<ResolvedConfig> {
    if !path.exists() {
        return Err(ValidationError::NotFound(path));
    }
    let settings = Settings::from_file(&path)?;
    Ok(ResolvedConfig {
        settings,
        source,
        path: Some(path),
    })
}
