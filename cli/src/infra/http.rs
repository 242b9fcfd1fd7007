//! HTTP infrastructure — implements `ManagementApi` and `ReleaseFeed` with
//! `reqwest`.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Response;
use secrecy::ExposeSecret;
use tracing::debug;
use trmm_common::{InstallerRequest, LatestRelease};

use crate::application::ports::{INSTALLER_PATH, ManagementApi, ReleaseFeed};
use crate::domain::{Credentials, ProvisionError, RepoRef};

/// Header carrying the management API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Release-feed API root.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("trmm-lam/", env!("CARGO_PKG_VERSION"));

fn transport(e: &reqwest::Error) -> ProvisionError {
    ProvisionError::Transport(e.to_string())
}

fn build_client() -> Result<reqwest::Client, ProvisionError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| transport(&e))
}

/// Body of a successful response; any other status is `UpstreamStatus`.
async fn success_body(response: Response) -> Result<String, ProvisionError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProvisionError::UpstreamStatus(status.as_u16()));
    }
    response.text().await.map_err(|e| transport(&e))
}

// ── Management API ────────────────────────────────────────────────────────────

/// Production `ManagementApi` over HTTPS.
pub struct RestManagementApi {
    http: reqwest::Client,
}

impl RestManagementApi {
    /// # Errors
    ///
    /// `Transport` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ProvisionError> {
        Ok(Self {
            http: build_client()?,
        })
    }
}

impl ManagementApi for RestManagementApi {
    async fn get(&self, creds: &Credentials, path: &str) -> Result<String, ProvisionError> {
        creds.ensure_configured()?;
        debug!(path, "GET management API");
        let response = self
            .http
            .get(creds.endpoint(path))
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, creds.api_key.expose_secret().as_str())
            .send()
            .await
            .map_err(|e| transport(&e))?;
        success_body(response).await
    }

    async fn post_installer(
        &self,
        creds: &Credentials,
        request: &InstallerRequest,
    ) -> Result<String, ProvisionError> {
        creds.ensure_configured()?;
        debug!(client = request.client, site = request.site, "POST installer request");
        let response = self
            .http
            .post(creds.endpoint(INSTALLER_PATH))
            .header(API_KEY_HEADER, creds.api_key.expose_secret().as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| transport(&e))?;
        success_body(response).await
    }
}

// ── Release feed ──────────────────────────────────────────────────────────────

/// Production `ReleaseFeed` backed by the GitHub REST API.
pub struct GithubReleaseFeed {
    http: reqwest::Client,
    api_base: String,
}

impl GithubReleaseFeed {
    /// # Errors
    ///
    /// `Transport` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ProvisionError> {
        Self::with_api_base(GITHUB_API_BASE)
    }

    /// Feed rooted at another API base, e.g. a GitHub Enterprise mirror.
    ///
    /// # Errors
    ///
    /// `Transport` if the HTTP client cannot be built.
    pub fn with_api_base(api_base: &str) -> Result<Self, ProvisionError> {
        Ok(Self {
            http: build_client()?,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }
}

impl ReleaseFeed for GithubReleaseFeed {
    async fn latest_release(&self, repo: &RepoRef) -> Result<LatestRelease, ProvisionError> {
        let url = format!("{}{}", self.api_base, repo.latest_release_path());
        debug!(%url, "querying latest release");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let body = success_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| ProvisionError::MalformedResponse(format!("latest release: {e}")))
    }
}
