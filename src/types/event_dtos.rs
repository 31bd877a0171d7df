use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::gallery_dtos::GalleryInput;
use super::price_dtos::PriceInput;
use crate::utils::pagination::Page;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Town is required"))]
    pub town: String,
    pub image: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: String,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub prices: Vec<PriceInput>,
    #[serde(default)]
    #[validate(nested)]
    pub galleries: Vec<GalleryInput>,
}

/// Partial event update. A non-empty `prices` or `galleries` list replaces
/// the existing children.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    #[validate(length(min = 1))]
    pub town: Option<String>,
    pub image: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub prices: Vec<PriceInput>,
    #[serde(default)]
    #[validate(nested)]
    pub galleries: Vec<GalleryInput>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RequestCardsRequest {
    #[serde(alias = "eventPriceId")]
    pub event_price_id: Uuid,
    #[serde(alias = "orderAmount")]
    #[validate(range(min = 1, message = "Order amount must be at least 1"))]
    pub order_amount: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl SearchQuery {
    pub fn page(&self) -> Page {
        Page::new(
            self.page.unwrap_or(crate::utils::pagination::DEFAULT_PAGE),
            self.limit.unwrap_or(crate::utils::pagination::DEFAULT_LIMIT),
        )
    }
}
