//! Application service — end-to-end installer generation.
//!
//! Resolution runs strictly in sequence and stops at the first failure, so a
//! script is only assembled once every value is known.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;
use trmm_common::AgentType;

use crate::application::ports::{CompanionSession, ManagementApi, ReleaseFeed};
use crate::application::services::{management, mesh, release};
use crate::domain::script::{InstallerParams, assemble};
use crate::domain::{AgentArch, Credentials, ProvisionError};

/// What to generate.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    pub client_id: u32,
    pub site_id: u32,
    pub agent_type: AgentType,
    pub arch: AgentArch,
    /// Repository reference or explicit agent download URL.
    pub agent_reference: String,
    /// Deadline for the companion-service exchange.
    pub session_timeout: Duration,
}

/// Remote collaborators of the pipeline.
pub struct Backends<'a, A, F, S> {
    pub api: &'a A,
    pub feed: &'a F,
    pub session: &'a S,
}

/// Resolve every installer parameter.
///
/// # Errors
///
/// The first failing stage's error.
pub async fn resolve_params<A, F, S>(
    backends: &Backends<'_, A, F, S>,
    creds: &Credentials,
    request: &ProvisionRequest,
    cancel: &CancellationToken,
) -> Result<InstallerParams, ProvisionError>
where
    A: ManagementApi,
    F: ReleaseFeed,
    S: CompanionSession,
{
    creds.ensure_configured()?;

    let stages = async {
        let agent =
            release::resolve_agent_release(backends.feed, &request.agent_reference, request.arch).await?;

        let settings = management::fetch_settings(backends.api, creds).await?;
        let mesh_download_url =
            mesh::resolve_mesh_download_url(backends.session, &settings, request.session_timeout, cancel)
                .await?;

        let enrollment_token =
            management::request_enrollment_token(backends.api, creds, request.client_id, request.site_id)
                .await?;
        Ok::<_, ProvisionError>((agent, mesh_download_url, enrollment_token))
    };

    // HTTP stages carry no token of their own; cancellation drops them here.
    let (agent, mesh_download_url, enrollment_token) = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(ProvisionError::Cancelled),
        res = stages => res?,
    };

    Ok(InstallerParams {
        client_id: request.client_id,
        site_id: request.site_id,
        agent_type: request.agent_type,
        agent_download_url: agent.download_url,
        mesh_download_url,
        api_url: creds.api_url.clone(),
        enrollment_token,
    })
}

/// Resolve every parameter and fill in `template`.
///
/// # Errors
///
/// The first failing stage's error; nothing is assembled after a failure.
pub async fn generate_installer_script<A, F, S>(
    backends: &Backends<'_, A, F, S>,
    creds: &Credentials,
    request: &ProvisionRequest,
    template: &str,
    cancel: &CancellationToken,
) -> Result<String, ProvisionError>
where
    A: ManagementApi,
    F: ReleaseFeed,
    S: CompanionSession,
{
    let params = resolve_params(backends, creds, request, cancel).await?;
    let script = assemble(template, &params)?;
    info!(client = request.client_id, site = request.site_id, agent_type = %request.agent_type, "installer script assembled");
    Ok(script)
}
