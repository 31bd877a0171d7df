use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{listing_clause, PgStore};
use crate::models::gallery::{GalleryChanges, NewGallery};
use crate::models::{Gallery, Listing};
use crate::store::{GalleryStore, StoreResult};

#[async_trait]
impl GalleryStore for PgStore {
    async fn insert_gallery(&self, gallery: NewGallery) -> StoreResult<Gallery> {
        sqlx::query_as::<_, Gallery>(
            "INSERT INTO galleries (id, event_id, name, image) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(gallery.event_id)
        .bind(gallery.name)
        .bind(gallery.image)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_gallery(&self, id: Uuid) -> StoreResult<Option<Gallery>> {
        sqlx::query_as::<_, Gallery>("SELECT * FROM galleries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_gallery(
        &self,
        id: Uuid,
        changes: GalleryChanges,
    ) -> StoreResult<Option<Gallery>> {
        sqlx::query_as::<_, Gallery>(
            r#"
            UPDATE galleries SET
                name = COALESCE($2, name),
                image = COALESCE($3, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.image)
        .fetch_optional(&self.pool)
        .await
    }

    async fn galleries_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Gallery>> {
        sqlx::query_as::<_, Gallery>(
            "SELECT * FROM galleries WHERE event_id = $1 AND deleted_at IS NULL ORDER BY created_at ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_galleries(&self, listing: Listing) -> StoreResult<Vec<Gallery>> {
        sqlx::query_as::<_, Gallery>(&format!(
            "SELECT * FROM galleries WHERE {} ORDER BY created_at ASC",
            listing_clause(listing)
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn retire_galleries_for_event(
        &self,
        event_id: Uuid,
        at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE galleries SET deleted_at = $2, updated_at = $2 \
             WHERE event_id = $1 AND deleted_at IS NULL",
        )
        .bind(event_id)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn soft_delete_gallery(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        self.soft_delete("galleries", id, at).await
    }

    async fn delete_gallery(&self, id: Uuid) -> StoreResult<bool> {
        self.hard_delete("galleries", id).await
    }
}
