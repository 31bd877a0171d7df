use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Gallery {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewGallery {
    pub event_id: Uuid,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GalleryChanges {
    pub name: Option<String>,
    pub image: Option<String>,
}
