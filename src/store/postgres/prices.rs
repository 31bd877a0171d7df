use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{listing_clause, PgStore};
use crate::models::price::{NewPrice, PriceChanges};
use crate::models::{Listing, Price};
use crate::store::{PriceStore, StoreResult};

#[async_trait]
impl PriceStore for PgStore {
    async fn insert_price(&self, price: NewPrice) -> StoreResult<Price> {
        sqlx::query_as::<_, Price>(
            r#"
            INSERT INTO prices (id, event_id, title, description, amount, attendees, with_chips)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'without'))
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(price.event_id)
        .bind(price.title)
        .bind(price.description)
        .bind(price.amount)
        .bind(price.attendees)
        .bind(price.with_chips)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_price(&self, id: Uuid) -> StoreResult<Option<Price>> {
        sqlx::query_as::<_, Price>("SELECT * FROM prices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_price(&self, id: Uuid, changes: PriceChanges) -> StoreResult<Option<Price>> {
        sqlx::query_as::<_, Price>(
            r#"
            UPDATE prices SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                amount = COALESCE($4, amount),
                attendees = COALESCE($5, attendees),
                with_chips = COALESCE($6, with_chips),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.amount)
        .bind(changes.attendees)
        .bind(changes.with_chips)
        .fetch_optional(&self.pool)
        .await
    }

    async fn prices_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Price>> {
        sqlx::query_as::<_, Price>(
            "SELECT * FROM prices WHERE event_id = $1 AND deleted_at IS NULL ORDER BY amount ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_prices(&self, listing: Listing) -> StoreResult<Vec<Price>> {
        sqlx::query_as::<_, Price>(&format!(
            "SELECT * FROM prices WHERE {} ORDER BY created_at ASC",
            listing_clause(listing)
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn retire_prices_for_event(
        &self,
        event_id: Uuid,
        at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE prices SET deleted_at = $2, updated_at = $2 \
             WHERE event_id = $1 AND deleted_at IS NULL",
        )
        .bind(event_id)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn reserve_price(&self, id: Uuid, quantity: i32) -> StoreResult<Option<Price>> {
        sqlx::query_as::<_, Price>(
            r#"
            UPDATE prices SET
                order_amount = order_amount + $2,
                updated_at = NOW()
            WHERE id = $1
              AND (attendees IS NULL OR order_amount + $2 <= attendees)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
    }

    async fn soft_delete_price(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        self.soft_delete("prices", id, at).await
    }

    async fn delete_price(&self, id: Uuid) -> StoreResult<bool> {
        self.hard_delete("prices", id).await
    }
}
