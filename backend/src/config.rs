//! Server configuration, read from a `sliders.toml` file.
//!
//! The file is looked up at the path in `SLIDERS_CONFIG`, falling back to
//! `sliders.toml` in the working directory. A missing file means defaults; a
//! file that exists but cannot be read or parsed stops the server at startup.

use crate::engine::{CascadePolicy, SyncPolicy};
use common::model::locale::{Locale, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "sliders.toml";
const CONFIG_ENV: &str = "SLIDERS_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub default_locale: Locale,
    pub cascade_policy: CascadePolicy,
    pub json_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("sliders.sqlite"),
            default_locale: Locale::default_locale(),
            cascade_policy: CascadePolicy::Orphan,
            json_limit_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    pub fn sync_policy(&self) -> SyncPolicy {
        SyncPolicy {
            default_locale: self.default_locale.clone(),
            cascade: self.cascade_policy,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub fn load() -> Result<Config, ConfigError> {
    let path = config_path();
    if path.exists() {
        return load_from_path(&path);
    }
    log::info!(
        "No configuration at {}, using defaults (default locale '{}')",
        path.display(),
        DEFAULT_LOCALE
    );
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
pub fn save_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, content).map_err(io_err)
}
