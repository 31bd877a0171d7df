use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::models::event::SoftDeleted;
use crate::models::{Gallery, Listing};
use crate::store::Store;
use crate::types::gallery_dtos::{CreateGalleryRequest, UpdateGalleryRequest};
use crate::utils::error::AppError;

use super::{non_empty, require_event};

pub struct GalleryService {
    store: Arc<dyn Store>,
}

impl GalleryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: CreateGalleryRequest) -> Result<Gallery, AppError> {
        require_event(self.store.as_ref(), req.event_id).await?;
        Ok(self.store.insert_gallery(req.into()).await?)
    }

    pub async fn update(&self, id: Uuid, req: UpdateGalleryRequest) -> Result<Gallery, AppError> {
        self.store
            .update_gallery(id, req.into())
            .await?
            .ok_or_else(|| AppError::not_found("Gallery not found"))
    }

    pub async fn get_one(&self, id: Uuid) -> Result<Gallery, AppError> {
        self.store
            .find_gallery(id)
            .await?
            .ok_or_else(|| AppError::not_found("Gallery not found"))
    }

    pub async fn list(&self) -> Result<Vec<Gallery>, AppError> {
        non_empty(
            self.store.list_galleries(Listing::Active).await?,
            "No galleries found",
        )
    }

    pub async fn list_deleted(&self) -> Result<Vec<Gallery>, AppError> {
        non_empty(
            self.store.list_galleries(Listing::Deleted).await?,
            "No deleted galleries found",
        )
    }

    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Gallery>, AppError> {
        require_event(self.store.as_ref(), event_id).await?;
        non_empty(
            self.store.galleries_for_event(event_id).await?,
            "No galleries found for this event",
        )
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<SoftDeleted, AppError> {
        let deleted_at = Utc::now();
        if !self.store.soft_delete_gallery(id, deleted_at).await? {
            return Err(AppError::not_found("Gallery not found"));
        }
        Ok(SoftDeleted { id, deleted_at })
    }

    pub async fn hard_delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_gallery(id).await? {
            return Err(AppError::not_found("Gallery not found"));
        }
        Ok(())
    }
}
