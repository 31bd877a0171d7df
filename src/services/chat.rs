use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::models::chat::ChatRoomWithMembers;
use crate::models::event::SoftDeleted;
use crate::models::{Attendee, ChatMessage, ChatRoom, Listing};
use crate::store::Store;
use crate::types::chat_dtos::{CreateChatRoomRequest, UpdateChatRoomRequest};
use crate::utils::error::AppError;

use super::{non_empty, present, require_event};

pub struct ChatService {
    store: Arc<dyn Store>,
}

impl ChatService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_room(&self, req: CreateChatRoomRequest) -> Result<ChatRoom, AppError> {
        let event = require_event(self.store.as_ref(), req.event_id).await?;
        if self.store.find_chat_room_by_event(event.id).await?.is_some() {
            return Err(AppError::bad_request("Chat room already exists for this event"));
        }

        let room = self.store.insert_chat_room(event.id, &event.slug).await?;
        info!(room_id = %room.id, event_id = %event.id, "Chat room created");
        Ok(room)
    }

    pub async fn update_room(
        &self,
        id: Uuid,
        req: UpdateChatRoomRequest,
    ) -> Result<ChatRoom, AppError> {
        self.store
            .update_chat_room(id, req.event_name.trim())
            .await?
            .ok_or_else(|| AppError::not_found("Chat room not found"))
    }

    pub async fn get_room(&self, id: Uuid) -> Result<ChatRoomWithMembers, AppError> {
        let room = self
            .store
            .find_chat_room(id)
            .await?
            .ok_or_else(|| AppError::not_found("Chat room not found"))?;
        let members = self.store.chat_members(room.id).await?;

        Ok(ChatRoomWithMembers { room, members })
    }

    pub async fn get_room_by_event(&self, event_id: Uuid) -> Result<ChatRoomWithMembers, AppError> {
        let room = self
            .store
            .find_chat_room_by_event(event_id)
            .await?
            .filter(|room| room.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Chat room not found"))?;
        let members = self.store.chat_members(room.id).await?;

        Ok(ChatRoomWithMembers { room, members })
    }

    pub async fn list_rooms(&self) -> Result<Vec<ChatRoom>, AppError> {
        non_empty(
            self.store.list_chat_rooms(Listing::Active).await?,
            "No chat rooms found",
        )
    }

    pub async fn list_deleted_rooms(&self) -> Result<Vec<ChatRoom>, AppError> {
        non_empty(
            self.store.list_chat_rooms(Listing::Deleted).await?,
            "No deleted chat rooms found",
        )
    }

    pub async fn soft_delete_room(&self, id: Uuid) -> Result<SoftDeleted, AppError> {
        let deleted_at = Utc::now();
        if !self.store.soft_delete_chat_room(id, deleted_at).await? {
            return Err(AppError::not_found("Chat room not found"));
        }
        Ok(SoftDeleted { id, deleted_at })
    }

    pub async fn hard_delete_room(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_chat_room(id).await? {
            return Err(AppError::not_found("Chat room not found"));
        }
        Ok(())
    }

    /// Attaches an attendee to a room. Adding an existing member is a no-op.
    pub async fn add_member(
        &self,
        room_id: Uuid,
        attendee_id: Uuid,
    ) -> Result<Vec<Attendee>, AppError> {
        self.live_room(room_id).await?;
        self.require_attendee(attendee_id).await?;

        self.store.add_chat_member(room_id, attendee_id).await?;
        Ok(self.store.chat_members(room_id).await?)
    }

    pub async fn members(&self, room_id: Uuid) -> Result<Vec<Attendee>, AppError> {
        self.live_room(room_id).await?;
        Ok(self.store.chat_members(room_id).await?)
    }

    pub async fn send_message(
        &self,
        room_id: Uuid,
        attendee_id: Uuid,
        text: &str,
    ) -> Result<ChatMessage, AppError> {
        let text = non_blank(text)?;
        self.live_room(room_id).await?;
        self.require_attendee(attendee_id).await?;

        Ok(self
            .store
            .insert_chat_message(room_id, attendee_id, text)
            .await?)
    }

    pub async fn messages(&self, room_id: Uuid) -> Result<Vec<ChatMessage>, AppError> {
        self.live_room(room_id).await?;
        let mut messages = self.store.chat_messages(room_id).await?;
        messages.sort_by_key(|message| message.created_at);
        Ok(messages)
    }

    pub async fn edit_message(&self, id: Uuid, text: &str) -> Result<ChatMessage, AppError> {
        let text = non_blank(text)?;
        self.store
            .update_chat_message(id, text)
            .await?
            .ok_or_else(|| AppError::not_found("Message not found"))
    }

    pub async fn search_messages(
        &self,
        room_id: Uuid,
        keyword: Option<&str>,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let keyword = present(keyword).ok_or_else(|| AppError::bad_request("Keyword is required"))?;
        self.live_room(room_id).await?;

        non_empty(
            self.store.search_chat_messages(room_id, keyword).await?,
            "No messages found",
        )
    }

    pub async fn soft_delete_message(&self, id: Uuid) -> Result<SoftDeleted, AppError> {
        let deleted_at = Utc::now();
        if !self.store.soft_delete_chat_message(id, deleted_at).await? {
            return Err(AppError::not_found("Message not found"));
        }
        Ok(SoftDeleted { id, deleted_at })
    }

    pub async fn hard_delete_message(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_chat_message(id).await? {
            return Err(AppError::not_found("Message not found"));
        }
        Ok(())
    }

    async fn live_room(&self, id: Uuid) -> Result<ChatRoom, AppError> {
        self.store
            .find_chat_room(id)
            .await?
            .filter(|room| room.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Chat room not found"))
    }

    async fn require_attendee(&self, id: Uuid) -> Result<Attendee, AppError> {
        self.store
            .find_attendee(id)
            .await?
            .filter(|attendee| attendee.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Attendee not found"))
    }
}

fn non_blank(text: &str) -> Result<&str, AppError> {
    present(Some(text)).ok_or_else(|| AppError::bad_request("Message cannot be empty"))
}
