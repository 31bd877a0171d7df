//! In-process fan-out for chat rooms, keyed by event id.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};

pub mod ws;

const ROOM_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMembership {
    pub event_id: String,
    pub attendee_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub event_id: String,
    pub chatroom_id: String,
    pub attendee_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredMessage {
    pub attendee_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameError {
    pub message: String,
}

/// Frames a client may send: `{"event": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientFrame {
    JoinRoom(RoomMembership),
    LeaveRoom(RoomMembership),
    SendMessage(OutgoingMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerFrame {
    ReceiveMessage(DeliveredMessage),
    Error(FrameError),
}

#[derive(Clone, Default)]
pub struct ChatHub {
    rooms: Arc<RwLock<HashMap<String, broadcast::Sender<ServerFrame>>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, room: &str) -> broadcast::Receiver<ServerFrame> {
        if let Some(sender) = self.rooms.read().await.get(room) {
            return sender.subscribe();
        }

        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room.to_string())
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    /// Delivers `frame` to every subscriber of `room` and returns how many
    /// received it. A room nobody listens to is dropped.
    pub async fn publish(&self, room: &str, frame: ServerFrame) -> usize {
        let delivered = match self.rooms.read().await.get(room) {
            Some(sender) => sender.send(frame).ok(),
            None => return 0,
        };

        match delivered {
            Some(count) => count,
            None => {
                self.prune(room).await;
                0
            }
        }
    }

    pub async fn prune(&self, room: &str) {
        let mut rooms = self.rooms.write().await;
        if rooms
            .get(room)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            rooms.remove(room);
        }
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
