//! Client/site selection over the management API's client list.

use trmm_common::{Client, Site};

use crate::domain::error::ProvisionError;

/// Look up a client/site pair by id.
///
/// # Errors
///
/// `NotFound` if the client does not exist or has no such site.
pub fn find_client_site(
    clients: &[Client],
    client_id: u32,
    site_id: u32,
) -> Result<(&Client, &Site), ProvisionError> {
    let client = clients
        .iter()
        .find(|c| c.id == client_id)
        .ok_or_else(|| ProvisionError::NotFound(format!("client {client_id}")))?;
    let site = client
        .sites
        .iter()
        .find(|s| s.id == site_id)
        .ok_or_else(|| {
            ProvisionError::NotFound(format!("site {site_id} for client '{}'", client.name))
        })?;
    Ok((client, site))
}

/// Client names in list order, for interactive selection.
#[must_use]
pub fn client_names(clients: &[Client]) -> Vec<&str> {
    clients.iter().map(|c| c.name.as_str()).collect()
}
