//! Application service — typed reads and the enrollment-token request
//! against the management API.

use serde::de::DeserializeOwned;
use tracing::debug;
use trmm_common::{Client, InstallerRequest, InstallerResponse, Settings};

use crate::application::ports::{CLIENTS_PATH, ManagementApi, SETTINGS_PATH};
use crate::domain::enrollment::extract_enrollment_token;
use crate::domain::{Credentials, ProvisionError};

fn decode<T: DeserializeOwned>(what: &str, body: &str) -> Result<T, ProvisionError> {
    serde_json::from_str(body).map_err(|e| ProvisionError::MalformedResponse(format!("{what}: {e}")))
}

/// `GET /core/settings/`.
///
/// # Errors
///
/// Propagates API failures; `MalformedResponse` if a required setting is
/// missing or mistyped.
pub async fn fetch_settings(
    api: &impl ManagementApi,
    creds: &Credentials,
) -> Result<Settings, ProvisionError> {
    let body = api.get(creds, SETTINGS_PATH).await?;
    decode("settings", &body)
}

/// `GET /clients/`.
///
/// # Errors
///
/// Propagates API failures; `MalformedResponse` if a record does not decode.
pub async fn fetch_clients(
    api: &impl ManagementApi,
    creds: &Credentials,
) -> Result<Vec<Client>, ProvisionError> {
    let body = api.get(creds, CLIENTS_PATH).await?;
    let clients: Vec<Client> = decode("clients", &body)?;
    debug!(count = clients.len(), "fetched clients");
    Ok(clients)
}

/// Request a single-use enrollment token for `client`/`site`.
///
/// # Errors
///
/// Propagates API failures; `MalformedResponse` if the response has no
/// command or the command has no `--auth` token.
pub async fn request_enrollment_token(
    api: &impl ManagementApi,
    creds: &Credentials,
    client: u32,
    site: u32,
) -> Result<String, ProvisionError> {
    creds.ensure_configured()?;
    let request = InstallerRequest::manual(client, site, &creds.api_url);
    let body = api.post_installer(creds, &request).await?;
    let response: InstallerResponse = decode("installer", &body)?;
    let token = extract_enrollment_token(&response.cmd)?;
    debug!(client, site, "obtained enrollment token");
    Ok(token)
}
