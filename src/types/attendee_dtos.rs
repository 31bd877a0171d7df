use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::attendee::{AttendeeChanges, NewAttendee};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAttendeeRequest {
    #[serde(alias = "eventId")]
    pub event_id: Uuid,
    #[serde(alias = "eventName")]
    pub event_name: Option<String>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    #[serde(alias = "priceCategory")]
    pub price_category: Option<String>,
    pub ticket: Option<String>,
    pub link: Option<String>,
    pub token: Option<String>,
}

impl From<CreateAttendeeRequest> for NewAttendee {
    fn from(req: CreateAttendeeRequest) -> Self {
        NewAttendee {
            event_id: req.event_id,
            event_name: req.event_name,
            name: Some(req.name),
            email: req.email,
            phone: req.phone,
            image: req.image,
            price_category: req.price_category,
            ticket: req.ticket,
            link: req.link,
            token: req.token,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAttendeeRequest {
    #[serde(alias = "eventName")]
    pub event_name: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    #[serde(alias = "priceCategory")]
    pub price_category: Option<String>,
    pub ticket: Option<String>,
    pub link: Option<String>,
    #[serde(alias = "checkedIn")]
    pub checked_in: Option<bool>,
    #[serde(alias = "thankyouMail")]
    pub thank_you_sent: Option<bool>,
}

impl From<UpdateAttendeeRequest> for AttendeeChanges {
    fn from(req: UpdateAttendeeRequest) -> Self {
        AttendeeChanges {
            event_name: req.event_name,
            name: req.name,
            email: req.email,
            phone: req.phone,
            image: req.image,
            price_category: req.price_category,
            ticket: req.ticket,
            link: req.link,
            checked_in: req.checked_in,
            thank_you_sent: req.thank_you_sent,
        }
    }
}
