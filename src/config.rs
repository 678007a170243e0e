use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiVersion;
use crate::error::{FrameError, Result};
use crate::export::TableStyle;
use crate::utils::Timezone;

const TOKEN_ENV: &str = "OURA_PERSONAL_ACCESS_TOKEN";
const VERSION_ENV: &str = "OURA_API_VERSION";
const BASE_URL_ENV: &str = "OURA_BASE_URL";

#[derive(Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub personal_access_token: Option<String>,
    #[serde(default)]
    pub api_version: Option<ApiVersion>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Zone for decoded timestamps; unset keeps the offset the API reports
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub table_style: Option<TableStyle>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub debug: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "personal_access_token",
                &self.personal_access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timezone", &self.timezone)
            .field("table_style", &self.table_style)
            .field("timeout_secs", &self.timeout_secs)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Config {
    /// First config file that parses, then environment overrides
    pub fn load() -> Self {
        Self::load_internal(false)
    }

    pub fn load_quiet() -> Self {
        Self::load_internal(true)
    }

    fn load_internal(quiet: bool) -> Self {
        Self::from_files(quiet).with_env_overrides(|k| std::env::var(k).ok())
    }

    fn from_files(quiet: bool) -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::from_toml_str(&content) {
                    Ok(config) => {
                        if !quiet {
                            eprintln!("Loaded config from {}", path.display());
                        }
                        return config;
                    }
                    Err(e) => {
                        if !quiet {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FrameError::Config(e.to_string()))
    }

    /// Apply environment values through `get`, so tests don't touch the
    /// process environment.
    pub fn with_env_overrides<F>(mut self, mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(token) = get(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.personal_access_token = Some(token);
        }
        if let Some(raw) = get(VERSION_ENV) {
            match ApiVersion::parse(&raw) {
                Ok(version) => self.api_version = Some(version),
                Err(e) => eprintln!("Warning: ignoring {VERSION_ENV}: {e}"),
            }
        }
        if let Some(url) = get(BASE_URL_ENV) {
            self.base_url = Some(url);
        }
        self
    }

    pub fn token(&self) -> Result<&str> {
        self.personal_access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| FrameError::Config(format!("no personal access token (set {TOKEN_ENV})")))
    }

    pub fn version(&self) -> ApiVersion {
        self.api_version.unwrap_or_default()
    }

    /// `None` when timestamps should keep the API's offset
    pub fn timezone(&self) -> Result<Option<Timezone>> {
        self.timezone
            .as_deref()
            .map(|tz| Timezone::parse(Some(tz)))
            .transpose()
    }

    pub fn style(&self) -> TableStyle {
        self.table_style.unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/oura-tables/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("oura-tables").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("oura-tables").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.oura-tables.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".oura-tables.toml"));
        }

        paths
    }
}
