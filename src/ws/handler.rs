//! WebSocket handler for client connections

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, error, info};

use crate::game::game_loop::{spawn_session, SessionCommand, SessionHandle};
use crate::game::GameSession;
use crate::protocol::ClientMessage;
use crate::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection: one connection, one game session
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session = GameSession::new(state.high_scores.current());
    let SessionHandle {
        id,
        commands,
        mut messages,
        task,
    } = spawn_session(session, state.high_scores.clone());

    info!("Player connected (session {})", id);

    let (mut sender, mut receiver) = socket.split();

    // Task to forward session output to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = messages.recv().await {
            if sender.send(Message::Text(msg.to_json().into())).await.is_err() {
                break;
            }
        }
    });

    // Task to turn client frames into session commands
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            let command = match result {
                Ok(Message::Text(text)) => match ClientMessage::parse(&text) {
                    Some(ClientMessage::Start) => SessionCommand::Start,
                    Some(ClientMessage::Reset) => SessionCommand::Reset,
                    Some(ClientMessage::Direction(dir)) => SessionCommand::Input(dir),
                    Some(ClientMessage::Ping) => continue,
                    None => {
                        debug!("Ignoring unknown message from session {}: {}", id, text.as_str());
                        continue;
                    }
                },
                Ok(Message::Close(_)) => {
                    info!("Session {} sent close frame", id);
                    break;
                }
                Ok(_) => continue,
                Err(e) => {
                    error!("WebSocket error for session {}: {}", id, e);
                    break;
                }
            };

            if commands.send(command).await.is_err() {
                break;
            }
        }
    });

    // Wait for either side to finish, then stop the other
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    // Dropping the command sender ends the session loop
    if let Err(e) = task.await {
        error!("Session {} task failed: {}", id, e);
    }

    info!("Player disconnected (session {})", id);
}
