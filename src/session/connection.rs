//! Transport-agnostic per-connection loop.
//!
//! Both the WebSocket and the line transport reduce a client to a stream
//! of inbound text messages and a sink of outbound text messages. This
//! module owns everything in between: the initial snapshot, intent
//! parsing, reply routing, broadcast fan-in, and disconnect cleanup.

use std::fmt::Display;
use std::sync::Arc;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, warn, Instrument};

use super::coordinator::Coordinator;
use crate::models::block::{BlockId, ClientId};
use crate::models::events::{ClientIntent, ServerEvent};
use crate::{AppError, Result};

/// Decode one inbound message.
///
/// # Errors
///
/// Returns the `error` event to send back when `text` is not a valid
/// intent. The block id is echoed when one can be recovered.
pub fn parse_intent(text: &str) -> std::result::Result<ClientIntent, ServerEvent> {
    serde_json::from_str::<ClientIntent>(text).map_err(|err| ServerEvent::Error {
        message: format!("invalid message: {err}"),
        block_id: salvage_block_id(text),
    })
}

fn salvage_block_id(text: &str) -> Option<BlockId> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let raw = value.get("blockId")?.as_u64()?;
    BlockId::try_from(raw).ok()
}

/// Serialize and send one event.
///
/// # Errors
///
/// Returns `AppError::Protocol` if the event cannot be encoded, or
/// `AppError::Transport` if the sink rejects it.
pub async fn send_event<W>(outbound: &mut W, event: &ServerEvent) -> Result<()>
where
    W: Sink<String> + Unpin,
    W::Error: Display,
{
    let text = serde_json::to_string(event)?;
    outbound
        .send(text)
        .await
        .map_err(|err| AppError::Transport(format!("failed to send {}: {err}", event.name())))
}

/// Serve one client until its stream ends, a send fails, or `cancel` fires.
///
/// Locks held by the client are always released on the way out.
pub async fn drive_connection<R, W>(
    coordinator: Arc<Coordinator>,
    who: ClientId,
    mut inbound: R,
    mut outbound: W,
    cancel: CancellationToken,
) where
    R: Stream<Item = String> + Unpin,
    W: Sink<String> + Unpin,
    W::Error: Display,
{
    let span = info_span!("connection", %who);
    async move {
        let (initial, mut events) = coordinator.connect(who).await;
        if let Err(err) = send_event(&mut outbound, &initial).await {
            warn!(%err, "failed to deliver initial state");
            coordinator.disconnect(who).await;
            return;
        }

        loop {
            let outgoing = tokio::select! {
                () = cancel.cancelled() => break,
                frame = inbound.next() => {
                    let Some(text) = frame else { break };
                    match parse_intent(&text) {
                        Ok(intent) => coordinator.handle(who, intent).await,
                        Err(reply) => {
                            debug!(len = text.len(), "rejected malformed message");
                            Some(reply)
                        }
                    }
                }
                received = events.recv() => match received {
                    Ok(event) => Some(event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "client lagged behind broadcast, resyncing");
                        let (snapshot, fresh) = coordinator.resync(who).await;
                        events = fresh;
                        Some(snapshot)
                    }
                    Err(RecvError::Closed) => break,
                },
            };

            if let Some(event) = outgoing {
                if let Err(err) = send_event(&mut outbound, &event).await {
                    debug!(%err, "outbound closed");
                    break;
                }
            }
        }

        coordinator.disconnect(who).await;
    }
    .instrument(span)
    .await;
}
