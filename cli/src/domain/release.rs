//! Agent release references and download-URL conventions.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::sync::LazyLock;

use regex::Regex;
pub use trmm_common::AgentArch;

use crate::domain::error::ProvisionError;

// ── Constants ────────────────────────────────────────────────────────────────

/// The only hosting domain releases are resolved against.
pub const RELEASE_HOST: &str = "github.com";

/// Upstream agent repository, used for version lookups when the configured
/// download location is not on [`RELEASE_HOST`].
pub const UPSTREAM_AGENT_REPO: &str = "https://github.com/amidaware/rmmagent";

/// Default reference the CLI resolves agent builds from.
pub const DEFAULT_AGENT_REPO: &str = "https://github.com/soarinferret/rmmagent-builder/";

static REPO_REF: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^(?i:(?P<scheme>[a-z][a-z0-9+.-]*))://(?P<host>[^/]+)/(?P<owner>[^/]+)/(?P<repo>[^/]+)(?:/.*)?$")
});

// ── Types ────────────────────────────────────────────────────────────────────

/// Owner/repo pair on the hosting domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse `scheme://github.com/<owner>/<repo>[/...]`.
    ///
    /// # Errors
    ///
    /// `InvalidReference` when the reference has fewer than an owner and a
    /// repo segment or points at another host.
    pub fn parse(reference: &str) -> Result<Self, ProvisionError> {
        let invalid = || ProvisionError::InvalidReference(reference.to_string());
        let pattern = REPO_REF
            .as_ref()
            .map_err(|e| ProvisionError::InvalidReference(format!("{reference}: {e}")))?;
        let caps = pattern.captures(reference.trim()).ok_or_else(invalid)?;

        if !caps["host"].eq_ignore_ascii_case(RELEASE_HOST) {
            return Err(invalid());
        }

        Ok(Self {
            owner: caps["owner"].to_string(),
            repo: caps["repo"].to_string(),
        })
    }

    /// Path of the "latest release" endpoint relative to the API root.
    #[must_use]
    pub fn latest_release_path(&self) -> String {
        format!("/repos/{}/{}/releases/latest", self.owner, self.repo)
    }

    /// Public download URL of `artifact` attached to release `tag`.
    #[must_use]
    pub fn download_url(&self, tag: &str, artifact: &str) -> String {
        format!(
            "https://{RELEASE_HOST}/{}/{}/releases/download/{tag}/{artifact}",
            self.owner, self.repo
        )
    }
}

/// Release asset name of a Linux agent build for `arch`.
#[must_use]
pub fn artifact_name(arch: AgentArch) -> String {
    format!("rmmagent-linux-{}", arch.as_str())
}

/// Where the agent binary comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentSource {
    /// Latest release of a repository on the hosting domain.
    Release(RepoRef),
    /// Explicit download location used verbatim, no version lookup.
    Override(String),
}

impl AgentSource {
    /// Classify a configured reference.
    ///
    /// Anything that does not mention [`RELEASE_HOST`] is an override, even if
    /// it is not a URL at all.
    ///
    /// # Errors
    ///
    /// `InvalidReference` for an empty reference or a malformed
    /// hosting-domain URL.
    pub fn from_reference(reference: &str) -> Result<Self, ProvisionError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ProvisionError::InvalidReference("empty reference".to_string()));
        }
        if reference.to_ascii_lowercase().contains(RELEASE_HOST) {
            RepoRef::parse(reference).map(Self::Release)
        } else {
            Ok(Self::Override(reference.to_string()))
        }
    }
}

/// Resolved agent location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRelease {
    pub download_url: String,
    /// Release tag; `None` for override locations.
    pub version: Option<String>,
}

// ── Unit tests ───────────────────────────────────────────────────────────────
