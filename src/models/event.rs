use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Attendee, ChatMessage, Gallery, Price};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub location: String,
    pub town: String,
    pub image: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub user_id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub location: String,
    pub town: String,
    pub image: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub town: Option<String>,
    pub image: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// An event together with its ticket prices and gallery.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithChildren {
    #[serde(flatten)]
    pub event: Event,
    pub prices: Vec<Price>,
    pub galleries: Vec<Gallery>,
}

/// The full aggregate served by the single-event endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub prices: Vec<Price>,
    pub galleries: Vec<Gallery>,
    pub attendees: Vec<Attendee>,
    pub chats: Vec<ChatMessage>,
    pub past: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerEvent {
    #[serde(flatten)]
    pub event: Event,
    pub prices: Vec<Price>,
    pub galleries: Vec<Gallery>,
    pub attendees: Vec<Attendee>,
}

/// Events owned by one user, split around "now minus one day".
#[derive(Debug, Clone, Serialize)]
pub struct OwnerEvents {
    pub count: usize,
    pub all: Vec<OwnerEvent>,
    pub upcoming: Vec<OwnerEvent>,
    pub past: Vec<OwnerEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SoftDeleted {
    pub id: Uuid,
    pub deleted_at: DateTime<Utc>,
}
