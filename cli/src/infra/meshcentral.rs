//! Companion-service infrastructure — implements `CompanionSession` over a
//! `tokio-tungstenite` WebSocket.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt as _, StreamExt as _};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::Instant;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use trmm_common::MeshesRequest;

use crate::application::ports::CompanionSession;
use crate::domain::ProvisionError;
use crate::domain::mesh::{FrameOutcome, RESPONSE_ID, classify_frame, find_device_group};

/// How long to wait for the close handshake before dropping the connection.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Production `CompanionSession`: one connection per lookup.
pub struct WsCompanionSession;

impl CompanionSession for WsCompanionSession {
    async fn device_group_id(
        &self,
        ws_url: &str,
        group_name: &str,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<String, ProvisionError> {
        let (mut ws, _) = bounded(deadline, cancel, tokio_tungstenite::connect_async(ws_url))
            .await?
            .map_err(|e| ProvisionError::Transport(e.to_string()))?;
        debug!("companion session open");

        let result = discover(&mut ws, group_name, deadline, cancel).await;

        close_within(CLOSE_GRACE, ws.close(None)).await;
        result
    }
}

/// Drive a close handshake for at most `grace`; failures only get logged.
async fn close_within<F, E>(grace: Duration, close: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(grace, close).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!(error = %e, "companion session already closed"),
        Err(_elapsed) => debug!(?grace, "close handshake not acknowledged, dropping connection"),
    }
}

/// Run `fut` until it completes, `deadline` passes, or `cancel` fires.
async fn bounded<F: Future>(
    deadline: Instant,
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output, ProvisionError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ProvisionError::Cancelled),
        res = tokio::time::timeout_at(deadline, fut) => res.map_err(|_elapsed| ProvisionError::Timeout),
    }
}

/// Send the discovery request and read until the response arrives.
async fn discover<S>(
    ws: &mut WebSocketStream<S>,
    group_name: &str,
    deadline: Instant,
    cancel: &CancellationToken,
) -> Result<String, ProvisionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = serde_json::to_string(&MeshesRequest::new(RESPONSE_ID))
        .map_err(|e| ProvisionError::Protocol(e.to_string()))?;
    bounded(deadline, cancel, ws.send(Message::Text(request)))
        .await?
        .map_err(|e| ProvisionError::Transport(e.to_string()))?;

    loop {
        let frame = bounded(deadline, cancel, ws.next())
            .await?
            .ok_or_else(|| {
                ProvisionError::Transport("connection ended before device groups arrived".to_string())
            })?
            .map_err(|e| ProvisionError::Transport(e.to_string()))?;

        let text = match frame {
            Message::Text(text) => text,
            Message::Binary(bytes) => String::from_utf8(bytes)
                .map_err(|e| ProvisionError::Protocol(format!("binary frame is not UTF-8: {e}")))?,
            Message::Close(_) => {
                return Err(ProvisionError::Transport(
                    "server closed the session before device groups arrived".to_string(),
                ));
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
        };

        match classify_frame(&text)? {
            FrameOutcome::Ignored => debug!("skipping unrelated frame"),
            FrameOutcome::Meshes(meshes) => {
                debug!(count = meshes.len(), "received device groups");
                return find_device_group(&meshes, group_name);
            }
        }
    }
}
