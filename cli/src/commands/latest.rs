//! `trmm-lam latest` — report the newest agent release.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::release;
use crate::commands::AgentArgs;
use crate::infra::http::GithubReleaseFeed;
use crate::output::{json, progress};

/// Arguments for the latest command.
#[derive(Args, Debug)]
pub struct LatestArgs {
    #[command(flatten)]
    pub agent: AgentArgs,
}

/// Run the latest command.
///
/// # Errors
///
/// Returns an error if the reference is invalid or the release feed fails.
pub async fn run(app: &AppContext, args: LatestArgs) -> Result<()> {
    let reference = app.agent_reference(args.agent.agent_download_url.as_deref());
    let feed = GithubReleaseFeed::new()?;

    let pb = progress::maybe_spinner(app.output.show_progress(), "Checking latest agent release...");
    let resolved = async {
        let agent = release::resolve_agent_release(&feed, &reference, args.agent.arch).await?;
        let version = match agent.version.clone() {
            Some(tag) => tag,
            None => release::latest_agent_version(&feed, &reference).await?,
        };
        Ok::<_, crate::domain::ProvisionError>((agent, version))
    }
    .await;
    progress::finish_clear(&pb);
    let (agent, version) = resolved?;

    if app.is_json() {
        return json::print(&serde_json::json!({
            "version": version,
            "download_url": agent.download_url,
            "arch": args.agent.arch.as_str(),
        }));
    }
    app.output.kv("Latest version", &version);
    app.output.kv("Download URL  ", &agent.download_url);
    Ok(())
}
