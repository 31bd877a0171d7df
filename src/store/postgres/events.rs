use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{contains_pattern, listing_clause, PgStore};
use crate::models::event::{EventChanges, NewEvent};
use crate::models::{Event, Listing};
use crate::store::{EventStore, StoreResult};
use crate::utils::pagination::Page;

#[async_trait]
impl EventStore for PgStore {
    async fn insert_event(&self, event: NewEvent) -> StoreResult<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (id, user_id, title, slug, description, location, town, image, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.user_id)
        .bind(event.title)
        .bind(event.slug)
        .bind(event.description)
        .bind(event.location)
        .bind(event.town)
        .bind(event.image)
        .bind(event.start_date)
        .bind(event.end_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_event_by_slug(&self, slug: &str) -> StoreResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_event(&self, id: Uuid, changes: EventChanges) -> StoreResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                town = COALESCE($6, town),
                image = COALESCE($7, image),
                start_date = COALESCE($8, start_date),
                end_date = COALESCE($9, end_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.slug)
        .bind(changes.description)
        .bind(changes.location)
        .bind(changes.town)
        .bind(changes.image)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_events(&self, listing: Listing, page: Page) -> StoreResult<(Vec<Event>, i64)> {
        let filter = listing_clause(listing);
        let rows = sqlx::query_as::<_, Event>(&format!(
            "SELECT * FROM events WHERE {filter} ORDER BY start_date ASC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM events WHERE {filter}"
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    async fn list_events_by_owner(&self, user_id: &str) -> StoreResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE user_id = $1 AND deleted_at IS NULL ORDER BY start_date ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn search_events(&self, query: &str, page: Page) -> StoreResult<(Vec<Event>, i64)> {
        let pattern = contains_pattern(query);
        let rows = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE deleted_at IS NULL AND (title ILIKE $1 OR description ILIKE $1)
            ORDER BY start_date ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM events
            WHERE deleted_at IS NULL AND (title ILIKE $1 OR description ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    async fn search_events_by_town(
        &self,
        town: &str,
        page: Page,
    ) -> StoreResult<(Vec<Event>, i64)> {
        let pattern = contains_pattern(town);
        let rows = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE deleted_at IS NULL AND town ILIKE $1
            ORDER BY start_date ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM events WHERE deleted_at IS NULL AND town ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    async fn soft_delete_event(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let marked = sqlx::query(
            "UPDATE events SET deleted_at = $2, updated_at = $2 WHERE id = $1",
        )
        .bind(id)
        .bind(at)
        .execute(&mut *tx)
        .await?;

        if marked.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        for table in ["prices", "galleries"] {
            sqlx::query(&format!(
                "UPDATE {table} SET deleted_at = $2, updated_at = $2 WHERE event_id = $1"
            ))
            .bind(id)
            .bind(at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<bool> {
        self.hard_delete("events", id).await
    }
}
