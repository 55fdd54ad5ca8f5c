//! HTTP transport: WebSocket sessions plus read-only endpoints.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /ws` | WebSocket upgrade; one JSON message per text frame |
//! | `GET /state` | Current board snapshot as JSON |
//! | `GET /health` | Liveness probe returning `ok` |

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use futures_util::{future, SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::models::block::ClientId;
use crate::models::events::BoardSnapshot;
use crate::session::connection::drive_connection;
use crate::session::coordinator::Coordinator;
use crate::{AppError, Result};

#[derive(Clone)]
struct HttpState {
    coordinator: Arc<Coordinator>,
    ct: CancellationToken,
}

/// Handler for `GET /health`.
async fn health() -> &'static str {
    "ok"
}

/// Handler for `GET /state`.
async fn state(State(http): State<HttpState>) -> Json<BoardSnapshot> {
    Json(http.coordinator.snapshot().await)
}

/// Handler for `GET /ws`.
async fn upgrade(ws: WebSocketUpgrade, State(http): State<HttpState>) -> Response {
    ws.on_upgrade(move |socket| serve_socket(socket, http))
}

async fn serve_socket(socket: WebSocket, http: HttpState) {
    let (sink, stream) = socket.split();

    // Binary, ping, and pong frames carry nothing for us; a close frame or
    // read error ends the session.
    let inbound = stream
        .take_while(|frame| {
            future::ready(matches!(frame, Ok(message) if !matches!(message, Message::Close(_))))
        })
        .filter_map(|frame| {
            future::ready(match frame {
                Ok(Message::Text(text)) => Some(text.as_str().to_owned()),
                Ok(other) => {
                    debug!(?other, "ignoring non-text frame");
                    None
                }
                Err(_) => None,
            })
        });

    let outbound =
        sink.with(|text: String| future::ready(Ok::<_, axum::Error>(Message::Text(text.into()))));

    drive_connection(
        http.coordinator,
        ClientId::new(),
        Box::pin(inbound),
        Box::pin(outbound),
        http.ct,
    )
    .await;
}

/// Build the HTTP router.
#[must_use]
pub fn router(coordinator: Arc<Coordinator>, ct: CancellationToken) -> Router {
    Router::new()
        .route("/ws", get(upgrade))
        .route("/state", get(state))
        .route("/health", get(health))
        .with_state(HttpState { coordinator, ct })
}

/// Serve HTTP on `listener` until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Transport` if the server fails.
pub async fn serve_http(
    listener: TcpListener,
    coordinator: Arc<Coordinator>,
    ct: CancellationToken,
) -> Result<()> {
    let addr = listener
        .local_addr()
        .map_err(|err| AppError::Transport(format!("http listener has no address: {err}")))?;
    info!(%addr, "starting HTTP/WebSocket transport");

    let app = router(coordinator, ct.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Transport(format!("http server error: {err}")))?;

    info!("HTTP/WebSocket transport shut down");
    Ok(())
}
