//! `reqwest` adapters against a loopback HTTP server.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use trmm_common::InstallerRequest;
use trmm_lam::application::ports::{ManagementApi, ReleaseFeed, SETTINGS_PATH};
use trmm_lam::domain::{Credentials, ProvisionError, RepoRef};
use trmm_lam::infra::http::{GithubReleaseFeed, RestManagementApi};

use crate::helpers::http_server;

#[tokio::test]
async fn test_get_sends_api_key_and_returns_body() {
    let (base, server) = http_server(200, r#"{"ok":true}"#).await;
    let api = RestManagementApi::new().unwrap();

    let body = api
        .get(&Credentials::new(&base, "secret-key"), SETTINGS_PATH)
        .await
        .unwrap();
    assert_eq!(body, r#"{"ok":true}"#);

    let request = server.await.unwrap().to_ascii_lowercase();
    assert!(request.starts_with("get /core/settings/ http/1.1"), "{request}");
    assert!(request.contains("x-api-key: secret-key"), "{request}");
    assert!(request.contains("content-type: application/json"), "{request}");
}

#[tokio::test]
async fn test_non_success_status_is_upstream_status() {
    let (base, _server) = http_server(403, r#"{"detail":"denied"}"#).await;
    let api = RestManagementApi::new().unwrap();

    let err = api
        .get(&Credentials::new(&base, "k"), SETTINGS_PATH)
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisionError::UpstreamStatus(403)), "got: {err}");
}

#[tokio::test]
async fn test_post_installer_sends_json_body() {
    let (base, server) = http_server(200, r#"{"cmd":"x --auth t"}"#).await;
    let api = RestManagementApi::new().unwrap();
    let creds = Credentials::new(&base, "k");

    api.post_installer(&creds, &InstallerRequest::manual(3, 4, &base))
        .await
        .unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /agents/installer/ HTTP/1.1"), "{request}");
    let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["installMethod"], "manual");
    assert_eq!(json["client"], 3);
    assert_eq!(json["site"], 4);
}

#[tokio::test]
async fn test_unconfigured_credentials_never_connect() {
    let api = RestManagementApi::new().unwrap();
    let err = api
        .get(&Credentials::new("https://api.example.com", ""), SETTINGS_PATH)
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisionError::NotConfigured("API key")), "got: {err}");
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = RestManagementApi::new().unwrap();
    let err = api
        .get(&Credentials::new(&format!("http://{addr}"), "k"), SETTINGS_PATH)
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisionError::Transport(_)), "got: {err}");
}

#[tokio::test]
async fn test_latest_release_reads_tag_name() {
    let (base, server) = http_server(200, r#"{"tag_name":"v2.9.0","name":"v2.9.0"}"#).await;
    let feed = GithubReleaseFeed::with_api_base(&base).unwrap();
    let repo = RepoRef::parse("https://github.com/acme/agent").unwrap();

    let release = feed.latest_release(&repo).await.unwrap();
    assert_eq!(release.tag_name, "v2.9.0");

    let request = server.await.unwrap();
    assert!(
        request.starts_with("GET /repos/acme/agent/releases/latest HTTP/1.1"),
        "{request}"
    );
}

#[tokio::test]
async fn test_latest_release_without_tag_is_malformed() {
    let (base, _server) = http_server(200, r#"{"name":"nightly"}"#).await;
    let feed = GithubReleaseFeed::with_api_base(&base).unwrap();
    let repo = RepoRef::parse("https://github.com/acme/agent").unwrap();

    let err = feed.latest_release(&repo).await.unwrap_err();
    assert!(matches!(err, ProvisionError::MalformedResponse(_)), "got: {err}");
}

#[tokio::test]
async fn test_latest_release_missing_repo_is_upstream_status() {
    let (base, _server) = http_server(404, r#"{"message":"Not Found"}"#).await;
    let feed = GithubReleaseFeed::with_api_base(&base).unwrap();
    let repo = RepoRef::parse("https://github.com/acme/agent").unwrap();

    let err = feed.latest_release(&repo).await.unwrap_err();
    assert!(matches!(err, ProvisionError::UpstreamStatus(404)), "got: {err}");
}
