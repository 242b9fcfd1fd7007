//! Application service — companion-service device-group resolution.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use trmm_common::Settings;

use crate::application::ports::CompanionSession;
use crate::domain::ProvisionError;
use crate::domain::auth_token::derive_token;
use crate::domain::config::MAX_SESSION_TIMEOUT_SECS;
use crate::domain::mesh::{agent_install_url, control_url};

/// Login domain used for every companion-service session.
pub const MESH_DOMAIN: &str = "";

/// Build `wss://<host>/control.ashx?auth=<token>` with a freshly derived token.
///
/// # Errors
///
/// `InvalidKey`/`Crypto` from token derivation, `InvalidReference` if the
/// site has no host.
pub fn session_url(site_url: &str, user: &str, shared_key_hex: &str) -> Result<String, ProvisionError> {
    let token = derive_token(user, MESH_DOMAIN, shared_key_hex)?;
    control_url(site_url, &token)
}

/// Resolve the configured device group and return the agent install URL.
///
/// # Errors
///
/// Token, connection, protocol, not-found, timeout and cancellation failures
/// propagate unchanged.
pub async fn resolve_mesh_download_url(
    session: &impl CompanionSession,
    settings: &Settings,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<String, ProvisionError> {
    let ws_url = session_url(&settings.mesh_site, &settings.mesh_username, &settings.mesh_token)?;
    debug!(site = %settings.mesh_site, group = %settings.mesh_device_group, "resolving device group");

    let timeout = timeout.min(Duration::from_secs(MAX_SESSION_TIMEOUT_SECS));
    let deadline = Instant::now()
        .checked_add(timeout)
        .ok_or(ProvisionError::Timeout)?;
    let id = session
        .device_group_id(&ws_url, &settings.mesh_device_group, deadline, cancel)
        .await?;

    info!(group = %settings.mesh_device_group, "resolved device group");
    Ok(agent_install_url(&settings.mesh_site, &id))
}
