//! `WsCompanionSession` against a loopback companion service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use trmm_lam::application::ports::CompanionSession;
use trmm_lam::domain::ProvisionError;
use trmm_lam::infra::meshcentral::WsCompanionSession;

use crate::helpers::{WsObservation, meshes_frame, ws_server};

const GROUPS: &[(&str, &str)] = &[("Group A", "mesh//ABC123"), ("Group B2", "mesh//XYZ")];

async fn lookup(
    frames: Vec<Message>,
    group: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> (Result<String, ProvisionError>, WsObservation) {
    let (url, server) = ws_server(frames).await;
    let result = WsCompanionSession
        .device_group_id(&url, group, Instant::now() + timeout, cancel)
        .await;
    let seen = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server finished")
        .expect("server task");
    (result, seen)
}

#[tokio::test]
async fn test_device_group_id_strips_prefix() {
    let (result, seen) = lookup(
        vec![meshes_frame(GROUPS)],
        "Group A",
        Duration::from_secs(5),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(result.unwrap(), "ABC123");
    assert!(seen.saw_close, "session must be closed after success");
}

#[tokio::test]
async fn test_device_group_request_asks_for_meshes() {
    let (_, seen) = lookup(
        vec![meshes_frame(GROUPS)],
        "Group A",
        Duration::from_secs(5),
        &CancellationToken::new(),
    )
    .await;

    let request: serde_json::Value =
        serde_json::from_str(&seen.request.expect("request sent")).unwrap();
    assert_eq!(request["action"], "meshes");
    assert_eq!(request["responseid"], "meshctrl");
}

#[tokio::test]
async fn test_device_group_skips_unrelated_frames() {
    let frames = vec![
        Message::Text(r#"{"action":"serverinfo","serverinfo":{}}"#.to_string()),
        Message::Ping(vec![1]),
        Message::Text(r#"{"action":"userinfo"}"#.to_string()),
        meshes_frame(GROUPS),
    ];
    let (result, _) = lookup(frames, "Group B2", Duration::from_secs(5), &CancellationToken::new()).await;
    assert_eq!(result.unwrap(), "XYZ");
}

#[tokio::test]
async fn test_device_group_missing_is_not_found_and_closes() {
    let (result, seen) = lookup(
        vec![meshes_frame(GROUPS)],
        "Group B",
        Duration::from_secs(5),
        &CancellationToken::new(),
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ProvisionError::NotFound(_)), "got: {err}");
    assert!(seen.saw_close, "session must be closed after NotFound");
}

#[tokio::test]
async fn test_device_group_name_match_is_exact() {
    let (result, _) = lookup(
        vec![meshes_frame(GROUPS)],
        "group a",
        Duration::from_secs(5),
        &CancellationToken::new(),
    )
    .await;
    assert!(matches!(result, Err(ProvisionError::NotFound(_))));
}

#[tokio::test]
async fn test_malformed_frame_is_protocol_error() {
    let (result, seen) = lookup(
        vec![Message::Text("{not json".to_string())],
        "Group A",
        Duration::from_secs(5),
        &CancellationToken::new(),
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ProvisionError::Protocol(_)), "got: {err}");
    assert!(seen.saw_close);
}

#[tokio::test]
async fn test_silent_server_times_out_and_closes() {
    let started = std::time::Instant::now();
    let (result, seen) = lookup(
        Vec::new(),
        "Group A",
        Duration::from_millis(300),
        &CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(ProvisionError::Timeout)), "got: {result:?}");
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(seen.saw_close, "session must be closed after a timeout");
}

#[tokio::test]
async fn test_cancellation_stops_the_wait() {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let (result, seen) = lookup(Vec::new(), "Group A", Duration::from_secs(30), &cancel).await;

    assert!(matches!(result, Err(ProvisionError::Cancelled)), "got: {result:?}");
    assert!(seen.saw_close);
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = WsCompanionSession
        .device_group_id(
            &format!("ws://{addr}/control.ashx?auth=x"),
            "Group A",
            Instant::now() + Duration::from_secs(5),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisionError::Transport(_)), "got: {err}");
}
