//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Query parameters supplied at connect time.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// The connecting user's id. Optional: a missing or unparseable value
    /// still yields an accepted (unbound) connection.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// GET /ws?userId={uuid} — WebSocket upgrade
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Response {
    // Permissive handshake: bind the user when the id parses, accept the
    // connection either way.
    let user_id = query
        .user_id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw).ok());

    ws.on_upgrade(move |socket| handle_ws_connection(state, user_id, socket))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, user_id: Option<Uuid>, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.realtime.connections.register(user_id);
    let conn_id = handle.id;

    info!(
        conn_id = %conn_id,
        user_id = ?user_id,
        "WebSocket connection established"
    );

    // Spawn outbound frame forwarder: one writer per connection preserves
    // per-connection delivery order.
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // Process inbound events until the peer goes away.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state.realtime.connections.handle_inbound(&conn_id, &text);
            }
            Ok(Message::Close(_)) => {
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Cleanup: no membership survives a dropped connection.
    outbound_task.abort();
    state.realtime.connections.unregister(&conn_id);

    info!(
        conn_id = %conn_id,
        user_id = ?user_id,
        "WebSocket connection closed"
    );
}
