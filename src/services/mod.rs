//! Domain services. Each owns one entity family and speaks in `AppError`.

pub mod attendees;
pub mod chat;
pub mod events;
pub mod gallery;
pub mod invitations;
pub mod payments;
pub mod prices;
pub mod tokens;

pub use attendees::AttendeeService;
pub use chat::ChatService;
pub use events::EventService;
pub use gallery::GalleryService;
pub use invitations::InvitationService;
pub use payments::PaymentService;
pub use prices::PriceService;
pub use tokens::TokenService;

use uuid::Uuid;

use crate::models::Event;
use crate::store::Store;
use crate::utils::error::AppError;

/// Loads an event that has not been soft-deleted.
pub(crate) async fn require_event(store: &dyn Store, id: Uuid) -> Result<Event, AppError> {
    store
        .find_event(id)
        .await?
        .filter(|event| event.deleted_at.is_none())
        .ok_or_else(|| AppError::not_found("Event not found"))
}

/// Listings answer "nothing here" with a 404 rather than an empty array.
pub(crate) fn non_empty<T>(rows: Vec<T>, message: &str) -> Result<Vec<T>, AppError> {
    if rows.is_empty() {
        return Err(AppError::not_found(message));
    }
    Ok(rows)
}

/// Trims an optional string, treating blanks as absent.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
