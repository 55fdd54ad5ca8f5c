//! Newline-delimited JSON over TCP for local tools and bots.
//!
//! ## Protocol
//!
//! Request (one JSON object per line):
//! ```json
//! {"type": "lockBlock", "blockId": 3}
//! {"type": "moveBlock", "blockId": 3, "row": 4, "col": 7}
//! {"type": "unlockBlock", "blockId": 3}
//! ```
//!
//! Every server event is written as one line, starting with
//! `{"event":"initialState",...}` on connect. Closing the socket releases
//! all locks the connection held.

use std::sync::Arc;

use futures_util::{future, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};

use super::codec::LineCodec;
use crate::models::block::ClientId;
use crate::session::connection::drive_connection;
use crate::session::coordinator::Coordinator;
use crate::{AppError, Result};

/// Accept line-protocol clients on `listener` until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Transport` if the listener address cannot be read.
pub async fn serve_lines(
    listener: TcpListener,
    coordinator: Arc<Coordinator>,
    ct: CancellationToken,
) -> Result<()> {
    let addr = listener
        .local_addr()
        .map_err(|err| AppError::Transport(format!("line listener has no address: {err}")))?;
    info!(%addr, "line transport listening");

    async move {
        loop {
            tokio::select! {
                () = ct.cancelled() => {
                    info!("line transport shutting down");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let coordinator = Arc::clone(&coordinator);
                        let ct = ct.clone();
                        tokio::spawn(
                            handle_stream(stream, coordinator, ct)
                                .instrument(info_span!("line_peer", %peer)),
                        );
                    }
                    Err(err) => warn!(%err, "line accept failed"),
                },
            }
        }
    }
    .instrument(info_span!("line_server", %addr))
    .await;

    Ok(())
}

async fn handle_stream(stream: TcpStream, coordinator: Arc<Coordinator>, ct: CancellationToken) {
    let (sink, frames) = Framed::new(stream, LineCodec::new()).split();

    // A framing or I/O error ends the session the same way EOF does.
    let inbound = frames
        .take_while(|frame| {
            if let Err(err) = frame {
                warn!(%err, "line read failed");
            }
            future::ready(frame.is_ok())
        })
        .filter_map(|frame| future::ready(frame.ok()))
        .filter(|line| future::ready(!line.trim().is_empty()));

    drive_connection(coordinator, ClientId::new(), Box::pin(inbound), sink, ct).await;
}
