//! WebSocket endpoint for live chat.
//!
//! Each socket gets one writer task fed by an mpsc outbox and one forwarding
//! task per joined room.

use std::collections::HashMap;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{ClientFrame, DeliveredMessage, FrameError, OutgoingMessage, ServerFrame};
use crate::state::AppState;

const OUTBOX_CAPACITY: usize = 64;

type Subscriptions = HashMap<String, JoinHandle<()>>;

pub async fn chat_socket(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (outbox, mut frames) = mpsc::channel::<ServerFrame>(OUTBOX_CAPACITY);

    let writer = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            let text = match serde_json::to_string(&frame) {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Failed to encode chat frame");
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut subscriptions = Subscriptions::new();
    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => handle_frame(&state, &text, &outbox, &mut subscriptions).await,
            Message::Close(_) => break,
            _ => {}
        }
    }

    for (room, task) in subscriptions.drain() {
        leave(&state, &room, task).await;
    }
    writer.abort();
    debug!("Chat socket closed");
}

async fn handle_frame(
    state: &AppState,
    text: &str,
    outbox: &mpsc::Sender<ServerFrame>,
    subscriptions: &mut Subscriptions,
) {
    let frame = match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            reply_error(outbox, format!("Invalid frame: {e}")).await;
            return;
        }
    };

    match frame {
        ClientFrame::JoinRoom(membership) => {
            if subscriptions.contains_key(&membership.event_id) {
                return;
            }
            let receiver = state.chat_hub.subscribe(&membership.event_id).await;
            let task = tokio::spawn(forward(receiver, outbox.clone()));
            debug!(room = %membership.event_id, attendee = %membership.attendee_id, "Joined chat room");
            subscriptions.insert(membership.event_id, task);
        }
        ClientFrame::LeaveRoom(membership) => {
            if let Some(task) = subscriptions.remove(&membership.event_id) {
                leave(state, &membership.event_id, task).await;
                debug!(room = %membership.event_id, attendee = %membership.attendee_id, "Left chat room");
            }
        }
        ClientFrame::SendMessage(message) => send_message(state, message, outbox).await,
    }
}

/// Broadcasts first, then persists on a spawned task. A failed write is
/// logged and never reported back to the room.
async fn send_message(
    state: &AppState,
    message: OutgoingMessage,
    outbox: &mpsc::Sender<ServerFrame>,
) {
    let (Ok(room_id), Ok(attendee_id)) = (
        Uuid::parse_str(&message.chatroom_id),
        Uuid::parse_str(&message.attendee_id),
    ) else {
        reply_error(outbox, "chatroomId and attendeeId must be UUIDs".to_string()).await;
        return;
    };

    state
        .chat_hub
        .publish(
            &message.event_id,
            ServerFrame::ReceiveMessage(DeliveredMessage {
                attendee_id: message.attendee_id,
                message: message.message.clone(),
            }),
        )
        .await;

    let chat = state.chat();
    tokio::spawn(async move {
        if let Err(e) = chat
            .send_message(room_id, attendee_id, &message.message)
            .await
        {
            error!(error = %e, %room_id, %attendee_id, "Failed to persist chat message");
        }
    });
}

async fn forward(mut receiver: broadcast::Receiver<ServerFrame>, outbox: mpsc::Sender<ServerFrame>) {
    loop {
        match receiver.recv().await {
            Ok(frame) => {
                if outbox.send(frame).await.is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Chat subscriber lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

async fn leave(state: &AppState, room: &str, task: JoinHandle<()>) {
    task.abort();
    // Wait for the receiver to drop so the room can be pruned.
    let _ = task.await;
    state.chat_hub.prune(room).await;
}

async fn reply_error(outbox: &mpsc::Sender<ServerFrame>, message: String) {
    let _ = outbox.send(ServerFrame::Error(FrameError { message })).await;
}
