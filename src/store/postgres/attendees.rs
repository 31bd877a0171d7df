use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{listing_clause, PgStore};
use crate::models::attendee::{AttendeeChanges, NewAttendee};
use crate::models::{Attendee, Listing};
use crate::store::{AttendeeStore, StoreResult};

#[async_trait]
impl AttendeeStore for PgStore {
    async fn insert_attendee(&self, attendee: NewAttendee) -> StoreResult<Attendee> {
        sqlx::query_as::<_, Attendee>(
            r#"
            INSERT INTO attendees
                (id, event_id, event_name, name, email, phone, image,
                 price_category, ticket, link, token)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(attendee.event_id)
        .bind(attendee.event_name)
        .bind(attendee.name)
        .bind(attendee.email)
        .bind(attendee.phone)
        .bind(attendee.image)
        .bind(attendee.price_category)
        .bind(attendee.ticket)
        .bind(attendee.link)
        .bind(attendee.token)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_attendee(&self, id: Uuid) -> StoreResult<Option<Attendee>> {
        sqlx::query_as::<_, Attendee>("SELECT * FROM attendees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_attendee_by_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> StoreResult<Option<Attendee>> {
        sqlx::query_as::<_, Attendee>(
            "SELECT * FROM attendees WHERE event_id = $1 AND email = $2",
        )
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_attendee_by_phone(
        &self,
        event_id: Uuid,
        phone: &str,
    ) -> StoreResult<Option<Attendee>> {
        sqlx::query_as::<_, Attendee>(
            "SELECT * FROM attendees WHERE event_id = $1 AND phone = $2 LIMIT 1",
        )
        .bind(event_id)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_attendee(
        &self,
        id: Uuid,
        changes: AttendeeChanges,
    ) -> StoreResult<Option<Attendee>> {
        sqlx::query_as::<_, Attendee>(
            r#"
            UPDATE attendees SET
                event_name = COALESCE($2, event_name),
                name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                image = COALESCE($6, image),
                price_category = COALESCE($7, price_category),
                ticket = COALESCE($8, ticket),
                link = COALESCE($9, link),
                checked_in = COALESCE($10, checked_in),
                thank_you_sent = COALESCE($11, thank_you_sent),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.event_name)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.phone)
        .bind(changes.image)
        .bind(changes.price_category)
        .bind(changes.ticket)
        .bind(changes.link)
        .bind(changes.checked_in)
        .bind(changes.thank_you_sent)
        .fetch_optional(&self.pool)
        .await
    }

    async fn attendees_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Attendee>> {
        sqlx::query_as::<_, Attendee>(
            "SELECT * FROM attendees WHERE event_id = $1 AND deleted_at IS NULL ORDER BY created_at ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_attendees(&self, listing: Listing) -> StoreResult<Vec<Attendee>> {
        sqlx::query_as::<_, Attendee>(&format!(
            "SELECT * FROM attendees WHERE {} ORDER BY created_at ASC",
            listing_clause(listing)
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn soft_delete_attendee(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        self.soft_delete("attendees", id, at).await
    }

    async fn delete_attendee(&self, id: Uuid) -> StoreResult<bool> {
        self.hard_delete("attendees", id).await
    }
}
