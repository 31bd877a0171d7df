use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::gallery::{GalleryChanges, NewGallery};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GalleryInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub image: Option<String>,
}

impl GalleryInput {
    pub fn for_event(self, event_id: Uuid) -> NewGallery {
        NewGallery {
            event_id,
            name: self.name,
            image: self.image,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGalleryRequest {
    #[serde(alias = "eventId")]
    pub event_id: Uuid,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub image: Option<String>,
}

impl From<CreateGalleryRequest> for NewGallery {
    fn from(req: CreateGalleryRequest) -> Self {
        NewGallery {
            event_id: req.event_id,
            name: req.name,
            image: req.image,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGalleryRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub image: Option<String>,
}

impl From<UpdateGalleryRequest> for GalleryChanges {
    fn from(req: UpdateGalleryRequest) -> Self {
        GalleryChanges {
            name: req.name,
            image: req.image,
        }
    }
}
