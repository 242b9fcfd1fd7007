//! Loopback servers standing in for the companion service and HTTP APIs.

#![allow(clippy::expect_used, dead_code)]

use futures_util::{SinkExt as _, StreamExt as _};
use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

// ── WebSocket ────────────────────────────────────────────────────────────────

/// What the loopback companion service saw from its single client.
#[derive(Debug, Default)]
pub struct WsObservation {
    /// First text frame received (the discovery request).
    pub request: Option<String>,
    /// Whether the client sent a close frame.
    pub saw_close: bool,
}

/// Accept one WebSocket client, wait for its request, answer with `frames`,
/// then read until the client closes.
pub async fn ws_server(frames: Vec<Message>) -> (String, JoinHandle<WsObservation>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("handshake");
        let mut seen = WsObservation::default();

        while let Some(Ok(msg)) = ws.next().await {
            match msg {
                Message::Text(text) if seen.request.is_none() => {
                    seen.request = Some(text);
                    for frame in frames.clone() {
                        if ws.send(frame).await.is_err() {
                            return seen;
                        }
                    }
                }
                Message::Close(_) => {
                    seen.saw_close = true;
                    break;
                }
                _ => {}
            }
        }
        seen
    });

    (format!("ws://{addr}/control.ashx?auth=test"), handle)
}

/// A `meshes` frame listing `(name, id)` pairs.
pub fn meshes_frame(groups: &[(&str, &str)]) -> Message {
    let meshes: Vec<_> = groups
        .iter()
        .map(|(name, id)| serde_json::json!({ "name": name, "_id": id }))
        .collect();
    Message::Text(serde_json::json!({ "action": "meshes", "meshes": meshes }).to_string())
}

// ── HTTP ─────────────────────────────────────────────────────────────────────

/// Serve a single HTTP request with `status` and a JSON `body`, returning the
/// raw request text (head and body) once it has been answered.
pub async fn http_server(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut stream).await;

        let response = format!(
            "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        let _ = stream.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
