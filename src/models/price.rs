use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Price {
    pub id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    /// Seat capacity; `None` means unlimited.
    pub attendees: Option<i32>,
    pub order_amount: i32,
    pub with_chips: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Price {
    /// Whether `quantity` more reservations still fit under the capacity.
    pub fn can_reserve(&self, quantity: i32) -> bool {
        match self.attendees {
            Some(capacity) => self.order_amount + quantity <= capacity,
            None => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPrice {
    pub event_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub attendees: Option<i32>,
    pub with_chips: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PriceChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub attendees: Option<i32>,
    pub with_chips: Option<String>,
}
