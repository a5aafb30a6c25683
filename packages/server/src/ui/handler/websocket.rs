//! WebSocket connection handlers.
//!
//! Each connection runs two tasks:
//!
//! - a read loop that decodes text frames and dispatches them in arrival order
//! - a writer (`pusher_loop`) that owns the socket sink and is the only task writing to it
//!
//! When either task finishes, the other is aborted and the disconnect cascade runs.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{domain::ConnectionId, ui::state::AppState};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs the disconnect cascade when dropped, whichever way the connection ends.
struct DisconnectGuard {
    state: Arc<AppState>,
    connection: ConnectionId,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let state = self.state.clone();
        let connection = self.connection;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No runtime to clean up connection {}", connection);
            return;
        };
        runtime.spawn(async move {
            match state.disconnect_client_usecase.execute(connection).await {
                Ok(left_rooms) => tracing::info!(
                    "Connection {} closed, left {} room(s)",
                    connection,
                    left_rooms.len()
                ),
                Err(e) => tracing::debug!("Skipping cleanup: {}", e),
            }
        });
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This is the only writer of the socket, so frames from concurrent broadcasts never interleave.
/// The task ends when the channel is closed (connection unregistered) or the socket write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

/// Spawns the read loop. Commands are dispatched on this task, one at a time,
/// so a connection's commands apply in the order they were sent.
fn reader_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on connection {}: {}", connection, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from {}: {}", connection, text.as_str());
                    match state.dispatcher.dispatch(connection, text.as_str()).await {
                        Ok(outcome) => tracing::debug!("Handled {:?}: {:?}", text, outcome),
                        Err(e) => {
                            tracing::warn!("Dropped {:?} from {}: {}", text, connection, e)
                        }
                    }
                }
                Message::Binary(_) => {
                    tracing::warn!("Ignoring non-text message from connection {}", connection);
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", connection);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection = state.connect_client_usecase.execute(tx).await;
    let _guard = DisconnectGuard {
        state: state.clone(),
        connection,
    };

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = reader_loop(receiver, state, connection);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };
}
