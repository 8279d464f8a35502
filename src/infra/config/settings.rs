//! Client settings: where the remote service lives and how to reach it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/openmrs/ws/etllite";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "ETL_CONSOLE_BASE_URL";
pub const ENV_USERNAME: &str = "ETL_CONSOLE_USERNAME";
pub const ENV_PASSWORD: &str = "ETL_CONSOLE_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "ETL_CONSOLE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            username: None,
            password: None,
        }
    }
}

impl Settings {
    /// Overrides fields from environment-style variables. Empty values are
    /// ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs =
                raw.trim()
                    .parse()
                    .map_err(|_| SettingsError::InvalidValue {
                        key: ENV_TIMEOUT_SECS,
                        value: raw.clone(),
                    })?;
        }
        Ok(())
    }

    pub fn apply_process_env(&mut self) -> Result<(), SettingsError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Basic-auth pair, present only when a username is configured.
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username
            .as_deref()
            .map(|user| (user, self.password.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("could not locate a configuration directory")]
    NoConfigDir,
    #[error("failed to read settings: {0}")]
    Read(String),
    #[error("settings file is not valid TOML: {0}")]
    InvalidFormat(String),
    #[error("failed to write settings: {0}")]
    Write(String),
    #[error("settings file version mismatch (found v{found}, expected v{expected})")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
