//! Console configuration
//!
//! Resolution order, later wins: config file, environment, command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cosmic_settings_api::{
    PaginationParams, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PAGE_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS, MAX_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};

pub const ENV_ENDPOINT: &str = "COSMIC_ENDPOINT";
pub const ENV_SESSION_KEY: &str = "COSMIC_SESSION_KEY";
pub const ENV_PAGE_SIZE: &str = "COSMIC_PAGE_SIZE";

/// Settings read from `config.toml`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Management API URL, e.g. `http://mgmt:8080/client/api`
    pub endpoint: Option<String>,
    pub session_key: Option<String>,
    pub page_size: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub language: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            session_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            language: "en-US".to_string(),
        }
    }
}

impl std::fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("endpoint", &self.endpoint)
            .field("session_key", &self.session_key.as_ref().map(|_| "***"))
            .field("page_size", &self.page_size)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("language", &self.language)
            .finish()
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub session_key: Option<String>,
    pub page_size: Option<u32>,
    pub language: Option<String>,
}

/// `<config_dir>/cosmic-settings/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cosmic-settings").join("config.toml"))
}

impl ConsoleConfig {
    /// Load from file, environment and flags.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.normalize();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variables through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = Some(endpoint);
        }
        if let Some(key) = lookup(ENV_SESSION_KEY) {
            self.session_key = Some(key);
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = size
                .trim()
                .parse()
                .with_context(|| format!("{ENV_PAGE_SIZE} is not a number: '{size}'"))?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint = Some(endpoint.clone());
        }
        if let Some(key) = &overrides.session_key {
            self.session_key = Some(key.clone());
        }
        if let Some(size) = overrides.page_size {
            self.page_size = size;
        }
        if let Some(language) = &overrides.language {
            self.language.clone_from(language);
        }
    }

    /// Clamp the page size and drop blank strings.
    pub fn normalize(&mut self) {
        let clamped = PaginationParams::new(1, self.page_size)
            .validated(MAX_PAGE_SIZE)
            .page_size;
        if clamped != self.page_size {
            tracing::warn!("page_size {} out of range, using {clamped}", self.page_size);
            self.page_size = clamped;
        }
        self.endpoint = self.endpoint.take().filter(|s| !s.trim().is_empty());
        self.session_key = self.session_key.take().filter(|s| !s.trim().is_empty());
    }

    pub fn endpoint(&self) -> Result<&str> {
        match self.endpoint.as_deref() {
            Some(endpoint) => Ok(endpoint),
            None => bail!(
                "No management endpoint configured; set `endpoint` in the config file, \
                 {ENV_ENDPOINT}, or --endpoint"
            ),
        }
    }
}
