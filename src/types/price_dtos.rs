use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::non_negative;
use crate::models::price::{NewPrice, PriceChanges};

/// A ticket price nested inside an event payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PriceInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    #[validate(range(min = 0))]
    pub attendees: Option<i32>,
    #[serde(alias = "withChips")]
    pub with_chips: Option<String>,
}

impl PriceInput {
    pub fn for_event(self, event_id: Uuid) -> NewPrice {
        NewPrice {
            event_id,
            title: self.title,
            description: self.description,
            amount: self.amount,
            attendees: self.attendees,
            with_chips: self.with_chips,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePriceRequest {
    #[serde(alias = "eventId")]
    pub event_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    #[validate(range(min = 0))]
    pub attendees: Option<i32>,
    #[serde(alias = "withChips")]
    pub with_chips: Option<String>,
}

impl From<CreatePriceRequest> for NewPrice {
    fn from(req: CreatePriceRequest) -> Self {
        NewPrice {
            event_id: req.event_id,
            title: req.title,
            description: req.description,
            amount: req.amount,
            attendees: req.attendees,
            with_chips: req.with_chips,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePriceRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub amount: Option<Decimal>,
    #[validate(range(min = 0))]
    pub attendees: Option<i32>,
    #[serde(alias = "withChips")]
    pub with_chips: Option<String>,
}

impl From<UpdatePriceRequest> for PriceChanges {
    fn from(req: UpdatePriceRequest) -> Self {
        PriceChanges {
            title: req.title,
            description: req.description,
            amount: req.amount,
            attendees: req.attendees,
            with_chips: req.with_chips,
        }
    }
}
