//! `trmm-lam install` — generate the Linux installer script and optionally
//! run it.

use anyhow::{Context, Result};
use tracing::info;

use crate::app::AppContext;
use crate::application::services::management;
use crate::application::services::provision::{self, Backends, ProvisionRequest};
use crate::commands::InstallArgs;
use crate::commands::view::pick_client_site;
use crate::domain::Credentials;
use crate::domain::clients::find_client_site;
use crate::domain::script::LINUX_INSTALL_SCRIPT;
use crate::infra::http::{GithubReleaseFeed, RestManagementApi};
use crate::infra::installer::{is_root, run_script, write_script};
use crate::infra::meshcentral::WsCompanionSession;
use crate::output::{json, progress};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the API is not configured, any upstream lookup fails,
/// the script cannot be written, or the executed script fails.
pub async fn run(app: &AppContext, args: InstallArgs) -> Result<()> {
    let creds = app.credentials(args.api.url.as_deref(), args.api.api_key.as_deref());
    creds.ensure_configured()?;

    let api = RestManagementApi::new()?;
    let feed = GithubReleaseFeed::new()?;
    let session = WsCompanionSession;

    let (client_id, site_id) = resolve_target(app, &api, &creds, args.client, args.site).await?;

    let request = ProvisionRequest {
        client_id,
        site_id,
        agent_type: args.agent_type,
        arch: args.agent.arch,
        agent_reference: app.agent_reference(args.agent.agent_download_url.as_deref()),
        session_timeout: app.config.session_timeout(),
    };
    let backends = Backends {
        api: &api,
        feed: &feed,
        session: &session,
    };

    app.cancel_on_ctrl_c();
    let pb = progress::maybe_spinner(app.output.show_progress(), "Generating installer script...");
    let script = match provision::generate_installer_script(
        &backends,
        &creds,
        &request,
        LINUX_INSTALL_SCRIPT,
        &app.cancel,
    )
    .await
    {
        Ok(script) => script,
        Err(e) => {
            progress::finish_clear(&pb);
            return Err(e).context("generating installer script");
        }
    };
    write_script(&args.output, &script)?;
    progress::finish_ok(&pb, &format!("Installer written to {}", args.output.display()));

    let executed = args.force && is_root();
    if executed {
        info!(path = %args.output.display(), "running installer");
        let status = run_script(&args.output).await?;
        anyhow::ensure!(status.success(), "installer script failed ({status})");
    }

    if app.is_json() {
        return json::print(&serde_json::json!({
            "script": args.output.display().to_string(),
            "client_id": client_id,
            "site_id": site_id,
            "agent_type": args.agent_type.as_str(),
            "arch": args.agent.arch.as_str(),
            "executed": executed,
        }));
    }

    if executed {
        app.output.success("Agent installed");
    } else {
        if args.force {
            app.output.warn("Not running as root; the installer was not executed");
        }
        app.output
            .info(&format!("Run it with: sudo bash {}", args.output.display()));
    }
    Ok(())
}

/// Client/site ids from the flags, checked against the server, or picked
/// interactively when either is missing.
async fn resolve_target(
    app: &AppContext,
    api: &RestManagementApi,
    creds: &Credentials,
    client: Option<u32>,
    site: Option<u32>,
) -> Result<(u32, u32)> {
    let pb = progress::maybe_spinner(app.output.show_progress(), "Fetching clients...");
    let clients = management::fetch_clients(api, creds).await;
    progress::finish_clear(&pb);
    let clients = clients.context("listing clients")?;

    let (client, site) = match (client, site) {
        (Some(client), Some(site)) => find_client_site(&clients, client, site)?,
        _ => pick_client_site(app, &clients)?,
    };
    Ok((client.id, site.id))
}
