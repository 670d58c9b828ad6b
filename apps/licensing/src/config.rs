//! Licensing client configuration.
//!
//! Priority: environment variables > settings file > defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;

use crate::logging::parse_level;

/// Where the proxy serves its API when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_BASE_URL: &str = "MWI_LICENSING_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MWI_LICENSING_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "MWI_LICENSING_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensingConfig {
    /// Proxy base URL, like `http://localhost:8888`.
    pub base_url: String,
    pub request_timeout: Duration,
    pub log_level: LevelFilter,
}

impl Default for LicensingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_level: LevelFilter::Info,
        }
    }
}

impl LicensingConfig {
    /// Loads the settings file and applies env overrides.
    pub fn load() -> Self {
        Self::from_settings_and_env(&load_settings())
    }

    pub fn from_settings_and_env(settings: &LicensingSettings) -> Self {
        Self::from_sources(settings, |key| env::var(key).ok())
    }

    /// Resolves each field from `env_var`, then `settings`, then the default.
    /// Unparseable values fall through to the next source.
    pub fn from_sources(settings: &LicensingSettings, env_var: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = env_var(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| settings.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout = env_var(ENV_TIMEOUT_SECS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .or(settings.request_timeout_secs.filter(|secs| *secs > 0))
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let log_level = env_var(ENV_LOG_LEVEL)
            .and_then(|v| parse_level(&v))
            .or_else(|| settings.log_level.as_deref().and_then(parse_level))
            .unwrap_or(LevelFilter::Info);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
            log_level,
        }
    }

    /// The endpoint the licensing payload is PUT to.
    pub fn set_licensing_url(&self) -> String {
        format!("{}/set_licensing_info", self.base_url)
    }
}

/// Contents of `licensing.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicensingSettings {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

/// `<config dir>/matlab-proxy/licensing.json`, like
/// `~/.config/matlab-proxy/licensing.json` on Linux.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("matlab-proxy").join("licensing.json"))
}

/// Loads settings from the user's config dir.
/// Returns defaults if the file doesn't exist or can't be parsed.
pub fn load_settings() -> LicensingSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => LicensingSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> LicensingSettings {
    let Ok(contents) = fs::read_to_string(path) else {
        return LicensingSettings::default();
    };
    match serde_json::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring unreadable settings file {}: {e}", path.display());
            LicensingSettings::default()
        }
    }
}
