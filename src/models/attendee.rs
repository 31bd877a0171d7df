use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendee {
    pub id: Uuid,
    pub event_id: Uuid,
    pub event_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub price_category: Option<String>,
    pub ticket: Option<String>,
    pub link: Option<String>,
    pub token: Option<String>,
    pub checked_in: bool,
    pub thank_you_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewAttendee {
    pub event_id: Uuid,
    pub event_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub price_category: Option<String>,
    pub ticket: Option<String>,
    pub link: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AttendeeChanges {
    pub event_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub price_category: Option<String>,
    pub ticket: Option<String>,
    pub link: Option<String>,
    pub checked_in: Option<bool>,
    pub thank_you_sent: Option<bool>,
}
