//! Companion-service addressing and device-group matching.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use trmm_common::{MESH_ID_PREFIX, MeshRecord, MeshesFrame};
use url::Url;

use crate::domain::error::ProvisionError;

/// Action name of the device-group discovery request and its response.
pub const MESHES_ACTION: &str = "meshes";

/// Response tag attached to the discovery request.
pub const RESPONSE_ID: &str = "meshctrl";

/// Control endpoint path on the companion service.
pub const CONTROL_PATH: &str = "/control.ashx";

/// `host[:port]` of the companion site.
///
/// # Errors
///
/// `InvalidReference` if the site is not an absolute URL with a host.
pub fn site_authority(site_url: &str) -> Result<String, ProvisionError> {
    let url = Url::parse(site_url.trim())
        .map_err(|e| ProvisionError::InvalidReference(format!("{site_url}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| ProvisionError::InvalidReference(format!("{site_url}: no host")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// `wss://<host>/control.ashx?auth=<token>`.
///
/// The token alphabet is query-safe, so it is not escaped.
///
/// # Errors
///
/// `InvalidReference` if the site URL has no host.
pub fn control_url(site_url: &str, token: &str) -> Result<String, ProvisionError> {
    let authority = site_authority(site_url)?;
    Ok(format!("wss://{authority}{CONTROL_PATH}?auth={token}"))
}

/// Install-package URL for Linux agents joining device group `id`.
#[must_use]
pub fn agent_install_url(site_url: &str, id: &str) -> String {
    format!(
        "{}/meshagents?id={id}&installflags=2&meshinstall=6",
        site_url.trim().trim_end_matches('/')
    )
}

/// Outcome of inspecting one received frame.
#[derive(Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not the discovery response; keep reading.
    Ignored,
    /// The discovery response, carrying every device group.
    Meshes(Vec<MeshRecord>),
}

/// Classify a text frame.
///
/// # Errors
///
/// `Protocol` if the frame is not JSON, or is a discovery response whose
/// records do not decode.
pub fn classify_frame(text: &str) -> Result<FrameOutcome, ProvisionError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ProvisionError::Protocol(format!("frame is not JSON: {e}")))?;

    if value.get("action").and_then(serde_json::Value::as_str) != Some(MESHES_ACTION) {
        return Ok(FrameOutcome::Ignored);
    }

    let frame: MeshesFrame = serde_json::from_value(value)
        .map_err(|e| ProvisionError::Protocol(format!("bad meshes frame: {e}")))?;
    Ok(FrameOutcome::Meshes(frame.meshes))
}

/// Find the device group named exactly `name` and strip the id prefix.
///
/// # Errors
///
/// `NotFound` if no record has that name, `Protocol` if the matching record's
/// id lacks [`MESH_ID_PREFIX`].
pub fn find_device_group(meshes: &[MeshRecord], name: &str) -> Result<String, ProvisionError> {
    let record = meshes
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| ProvisionError::NotFound(format!("device group '{name}'")))?;
    record
        .id
        .strip_prefix(MESH_ID_PREFIX)
        .map(str::to_string)
        .ok_or_else(|| {
            ProvisionError::Protocol(format!(
                "device group id '{}' does not start with {MESH_ID_PREFIX}",
                record.id
            ))
        })
}
