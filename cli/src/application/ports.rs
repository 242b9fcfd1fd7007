//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and shared wire records —
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use trmm_common::{InstallerRequest, LatestRelease};

use crate::domain::config::LamConfig;
use crate::domain::{Credentials, ProvisionError, RepoRef};

// ── Constants ─────────────────────────────────────────────────────────────────

pub const SETTINGS_PATH: &str = "/core/settings/";
pub const CLIENTS_PATH: &str = "/clients/";
pub const INSTALLER_PATH: &str = "/agents/installer/";

// ── Remote service ports ──────────────────────────────────────────────────────

/// Authenticated access to the management REST API.
///
/// Implementations must call [`Credentials::ensure_configured`] before any
/// network activity.
#[allow(async_fn_in_trait)]
pub trait ManagementApi {
    /// `GET <api_url><path>`, returning the raw body.
    async fn get(&self, creds: &Credentials, path: &str) -> Result<String, ProvisionError>;

    /// `POST <api_url>/agents/installer/`, returning the raw body.
    async fn post_installer(
        &self,
        creds: &Credentials,
        request: &InstallerRequest,
    ) -> Result<String, ProvisionError>;
}

/// Latest-release lookups on the code-hosting provider.
#[allow(async_fn_in_trait)]
pub trait ReleaseFeed {
    /// Fetch the latest published release of `repo`.
    async fn latest_release(&self, repo: &RepoRef) -> Result<LatestRelease, ProvisionError>;
}

/// One discovery exchange with the companion service.
#[allow(async_fn_in_trait)]
pub trait CompanionSession {
    /// Connect to `ws_url`, request the device groups, and return the
    /// prefix-stripped id of the group named exactly `group_name`.
    ///
    /// The connection is closed on every exit path. `deadline` and `cancel`
    /// are honored while connecting and at every receive.
    async fn device_group_id(
        &self,
        ws_url: &str,
        group_name: &str,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<String, ProvisionError>;
}

// ── Local ports ───────────────────────────────────────────────────────────────

/// Persistent configuration storage.
pub trait ConfigStore {
    /// Load the configuration, or defaults when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored configuration cannot be read or parsed.
    fn load(&self) -> Result<LamConfig>;

    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    fn save(&self, config: &LamConfig) -> Result<()>;

    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
