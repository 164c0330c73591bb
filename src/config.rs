use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use unitconv_core::ConversionPolicy;

const APP_NAME: &str = "unitconv";
const CONFIG_FILE: &str = "config.json";

/// Environment override for [`AppConfig::allow_negative`].
pub const ENV_ALLOW_NEGATIVE: &str = "UNITCONV_ALLOW_NEGATIVE";
/// Environment override for [`AppConfig::database_path`].
pub const ENV_DATABASE: &str = "UNITCONV_DB";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Accept negative values for length, mass, volume and speed.
    pub allow_negative: bool,
    /// Where the history database lives. Defaults to the platform data
    /// directory.
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            allow_negative: true,
            database_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides.
    /// Falls back to defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let config = match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Apply overrides looked up through `var`.
    ///
    /// Unparseable booleans are ignored with a warning.
    pub fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = var(ENV_ALLOW_NEGATIVE) {
            match parse_bool(&raw) {
                Some(allow) => self.allow_negative = allow,
                None => tracing::warn!("Ignoring {}={:?}: expected a boolean", ENV_ALLOW_NEGATIVE, raw),
            }
        }
        if let Some(path) = var(ENV_DATABASE).filter(|p| !p.trim().is_empty()) {
            self.database_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn policy(&self) -> ConversionPolicy {
        ConversionPolicy {
            allow_negative: self.allow_negative,
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
