//! `trmm-lam view` — browse clients and sites and print their ids.

use anyhow::{Context, Result};
use clap::Args;
use trmm_common::{Client, Site};

use crate::app::AppContext;
use crate::application::services::management;
use crate::commands::ApiArgs;
use crate::domain::clients::client_names;
use crate::infra::http::RestManagementApi;
use crate::output::{json, progress};

/// Arguments for the view command.
#[derive(Args, Debug)]
pub struct ViewArgs {
    #[command(flatten)]
    pub api: ApiArgs,
}

/// Run the view command.
///
/// # Errors
///
/// Returns an error if the API is not configured, the client list cannot be
/// fetched, or the selection is aborted.
pub async fn run(app: &AppContext, args: ViewArgs) -> Result<()> {
    let creds = app.credentials(args.api.url.as_deref(), args.api.api_key.as_deref());
    creds.ensure_configured()?;
    let api = RestManagementApi::new()?;

    let pb = progress::maybe_spinner(app.output.show_progress(), "Fetching clients...");
    let clients = management::fetch_clients(&api, &creds).await;
    progress::finish_clear(&pb);
    let clients = clients.context("listing clients")?;

    let (client, site) = pick_client_site(app, &clients)?;

    if app.is_json() {
        return json::print(&serde_json::json!({
            "client": { "id": client.id, "name": client.name },
            "site": { "id": site.id, "name": site.name },
        }));
    }
    app.output.kv("Client ID", &client.id.to_string());
    app.output.kv("Site ID  ", &site.id.to_string());
    Ok(())
}

/// Prompt for a client, then for one of its sites.
///
/// # Errors
///
/// Returns an error if prompting is disabled, a list is empty, or the
/// prompt fails.
pub fn pick_client_site<'c>(
    app: &AppContext,
    clients: &'c [Client],
) -> Result<(&'c Client, &'c Site)> {
    let index = app.select("Select a client", &client_names(clients))?;
    let client = &clients[index];

    let site_names: Vec<&str> = client.sites.iter().map(|s| s.name.as_str()).collect();
    let index = app.select(&format!("Select a site of {}", client.name), &site_names)?;
    Ok((client, &client.sites[index]))
}
