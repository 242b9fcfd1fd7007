//! Domain types and validators for trmm-lam configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::error::{ConfigError, ProvisionError};
use crate::domain::release::DEFAULT_AGENT_REPO;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api.url",
    "api.key",
    "agent.download_url",
    "session.timeout_secs",
];

/// Default deadline for the companion-service discovery exchange.
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for `session.timeout_secs` (one day).
pub const MAX_SESSION_TIMEOUT_SECS: u64 = 86_400;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.trmm-lam/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LamConfig {
    pub api: ApiConfig,
    pub agent: AgentConfig,
    pub session: SessionConfig,
}

/// Management API connection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Agent binary location.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AgentConfig {
    /// Repository reference or explicit download URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Companion-service session tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
        }
    }
}

impl LamConfig {
    /// Agent reference, falling back to the built-in default repository.
    #[must_use]
    pub fn agent_reference(&self) -> &str {
        self.agent.download_url.as_deref().unwrap_or(DEFAULT_AGENT_REPO)
    }

    /// Session deadline, clamped to `MAX_SESSION_TIMEOUT_SECS` for files
    /// edited by hand.
    #[must_use]
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session.timeout_secs.min(MAX_SESSION_TIMEOUT_SECS))
    }

    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "api.url" => self.api.url = Some(value.trim_end_matches('/').to_string()),
            "api.key" => self.api.key = Some(value.to_string()),
            "agent.download_url" => self.agent.download_url = Some(value.to_string()),
            "session.timeout_secs" => self.session.timeout_secs = value.parse()?,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Credentials ──────────────────────────────────────────────────────────────

/// Management API base URL and key, passed into every API operation.
pub struct Credentials {
    pub api_url: String,
    pub api_key: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.trim().to_string()),
        }
    }

    /// Fail fast when either half is missing.
    ///
    /// # Errors
    ///
    /// `NotConfigured` naming the first empty field.
    pub fn ensure_configured(&self) -> Result<(), ProvisionError> {
        if self.api_url.is_empty() {
            return Err(ProvisionError::NotConfigured("URL"));
        }
        if self.api_key.expose_secret().is_empty() {
            return Err(ProvisionError::NotConfigured("API key"));
        }
        Ok(())
    }

    /// Absolute URL of an API path such as `/clients/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };
    match key {
        "api.url" if !(value.starts_with("https://") || value.starts_with("http://")) => {
            Err(invalid("Expected an http:// or https:// URL").into())
        }
        "api.key" | "agent.download_url" if value.trim().is_empty() => {
            Err(invalid("Value must not be empty").into())
        }
        "session.timeout_secs"
            if !value
                .parse::<u64>()
                .is_ok_and(|n| (1..=MAX_SESSION_TIMEOUT_SECS).contains(&n)) =>
        {
            Err(invalid("Expected a positive number of seconds, at most 86400").into())
        }
        _ => Ok(()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
