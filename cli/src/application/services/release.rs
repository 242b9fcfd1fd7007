//! Application service — agent binary location and version lookups.

use tracing::{debug, info};

use crate::application::ports::ReleaseFeed;
use crate::domain::release::{UPSTREAM_AGENT_REPO, artifact_name};
use crate::domain::{AgentArch, AgentRelease, AgentSource, ProvisionError, RepoRef};

/// Resolve where to download the agent from.
///
/// A reference on the hosting domain is resolved to its latest release. Any
/// other reference is an explicit override and is returned verbatim without
/// touching the feed.
///
/// # Errors
///
/// `InvalidReference` for a malformed reference; feed failures propagate.
pub async fn resolve_agent_release(
    feed: &impl ReleaseFeed,
    reference: &str,
    arch: AgentArch,
) -> Result<AgentRelease, ProvisionError> {
    match AgentSource::from_reference(reference)? {
        AgentSource::Override(url) => {
            info!(%url, "using configured agent download location");
            Ok(AgentRelease {
                download_url: url,
                version: None,
            })
        }
        AgentSource::Release(repo) => {
            let release = feed.latest_release(&repo).await?;
            let download_url = repo.download_url(&release.tag_name, &artifact_name(arch));
            debug!(owner = %repo.owner, repo = %repo.repo, tag = %release.tag_name, "resolved latest agent release");
            Ok(AgentRelease {
                download_url,
                version: Some(release.tag_name),
            })
        }
    }
}

/// Latest published agent version for `reference`.
///
/// Override locations carry no version, so the upstream agent repository is
/// asked instead.
///
/// # Errors
///
/// `InvalidReference` for a malformed reference; feed failures propagate.
pub async fn latest_agent_version(
    feed: &impl ReleaseFeed,
    reference: &str,
) -> Result<String, ProvisionError> {
    let repo = match AgentSource::from_reference(reference)? {
        AgentSource::Release(repo) => repo,
        AgentSource::Override(_) => RepoRef::parse(UPSTREAM_AGENT_REPO)?,
    };
    Ok(feed.latest_release(&repo).await?.tag_name)
}
