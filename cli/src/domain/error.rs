//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Failures of the provisioning-data pipeline.
///
/// Every stage returns the first failure to its caller unchanged; nothing in
/// the pipeline retries.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A required setting was empty before any network activity.
    #[error("{0} is not set")]
    NotConfigured(&'static str),

    #[error("connection failed: {0}")]
    Transport(String),

    #[error("unexpected response from companion service: {0}")]
    Protocol(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid repository reference: {0}")]
    InvalidReference(String),

    #[error("upstream returned HTTP status {0}")]
    UpstreamStatus(u16),

    #[error("invalid companion-service key: {0}")]
    InvalidKey(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("encryption failed: {0}")]
    Crypto(String),

    #[error("timed out waiting for the companion service")]
    Timeout,

    #[error("operation cancelled")]
    Cancelled,

    #[error("installer template has no {0} placeholder")]
    MissingPlaceholder(&'static str),

    /// Script assembly would have emitted a partially-parameterized script.
    #[error("installer template placeholder {0} could not be resolved")]
    UnresolvedPlaceholder(&'static str),
}

impl ProvisionError {
    /// Short machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "NOT_CONFIGURED",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Protocol(_) => "PROTOCOL_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::UpstreamStatus(_) => "UPSTREAM_STATUS",
            Self::InvalidKey(_) => "INVALID_KEY",
            Self::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Self::Crypto(_) => "CRYPTO_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Cancelled => "CANCELLED",
            Self::MissingPlaceholder(_) => "MISSING_PLACEHOLDER",
            Self::UnresolvedPlaceholder(_) => "UNRESOLVED_PLACEHOLDER",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
