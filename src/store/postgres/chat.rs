use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{contains_pattern, listing_clause, PgStore};
use crate::models::{Attendee, ChatMessage, ChatRoom, Listing};
use crate::store::{ChatStore, StoreResult};

#[async_trait]
impl ChatStore for PgStore {
    async fn insert_chat_room(&self, event_id: Uuid, event_name: &str) -> StoreResult<ChatRoom> {
        sqlx::query_as::<_, ChatRoom>(
            "INSERT INTO chat_rooms (id, event_id, event_name) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(event_name)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_chat_room(&self, id: Uuid) -> StoreResult<Option<ChatRoom>> {
        sqlx::query_as::<_, ChatRoom>("SELECT * FROM chat_rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_chat_room_by_event(&self, event_id: Uuid) -> StoreResult<Option<ChatRoom>> {
        sqlx::query_as::<_, ChatRoom>("SELECT * FROM chat_rooms WHERE event_id = $1")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_chat_room(&self, id: Uuid, event_name: &str) -> StoreResult<Option<ChatRoom>> {
        sqlx::query_as::<_, ChatRoom>(
            "UPDATE chat_rooms SET event_name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(event_name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_chat_rooms(&self, listing: Listing) -> StoreResult<Vec<ChatRoom>> {
        sqlx::query_as::<_, ChatRoom>(&format!(
            "SELECT * FROM chat_rooms WHERE {} ORDER BY created_at ASC",
            listing_clause(listing)
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn soft_delete_chat_room(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        self.soft_delete("chat_rooms", id, at).await
    }

    async fn delete_chat_room(&self, id: Uuid) -> StoreResult<bool> {
        self.hard_delete("chat_rooms", id).await
    }

    async fn add_chat_member(&self, room_id: Uuid, attendee_id: Uuid) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_room_members (chat_room_id, attendee_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(room_id)
        .bind(attendee_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn chat_members(&self, room_id: Uuid) -> StoreResult<Vec<Attendee>> {
        sqlx::query_as::<_, Attendee>(
            r#"
            SELECT a.* FROM attendees a
            JOIN chat_room_members m ON m.attendee_id = a.id
            WHERE m.chat_room_id = $1
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_chat_message(
        &self,
        room_id: Uuid,
        attendee_id: Uuid,
        message: &str,
    ) -> StoreResult<ChatMessage> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (id, chat_room_id, attendee_id, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(room_id)
        .bind(attendee_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_chat_message(&self, id: Uuid) -> StoreResult<Option<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>("SELECT * FROM chat_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn chat_messages(&self, room_id: Uuid) -> StoreResult<Vec<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT * FROM chat_messages
            WHERE chat_room_id = $1 AND deleted_at IS NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn search_chat_messages(
        &self,
        room_id: Uuid,
        keyword: &str,
    ) -> StoreResult<Vec<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT * FROM chat_messages
            WHERE chat_room_id = $1 AND deleted_at IS NULL AND message ILIKE $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(room_id)
        .bind(contains_pattern(keyword))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_chat_message(
        &self,
        id: Uuid,
        message: &str,
    ) -> StoreResult<Option<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>(
            "UPDATE chat_messages SET message = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(message)
        .fetch_optional(&self.pool)
        .await
    }

    async fn soft_delete_chat_message(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        self.soft_delete("chat_messages", id, at).await
    }

    async fn delete_chat_message(&self, id: Uuid) -> StoreResult<bool> {
        self.hard_delete("chat_messages", id).await
    }
}
