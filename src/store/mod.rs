//! Persistence seams.
//!
//! Every entity family gets its own repository trait so services only see
//! the operations they need. [`PgStore`] backs them with PostgreSQL; the
//! test suite swaps in an in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::attendee::{AttendeeChanges, NewAttendee};
use crate::models::event::{EventChanges, NewEvent};
use crate::models::gallery::{GalleryChanges, NewGallery};
use crate::models::invitation::{InvitationChanges, InvitationSearch, NewInvitation};
use crate::models::payment::NewPayment;
use crate::models::price::{NewPrice, PriceChanges};
use crate::models::{
    AccessToken, Attendee, ChatMessage, ChatRoom, Event, Gallery, Invitation, Listing, Payment,
    PaymentStatus, Price,
};
use crate::utils::pagination::Page;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, sqlx::Error>;

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert_event(&self, event: NewEvent) -> StoreResult<Event>;
    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>>;
    async fn find_event_by_slug(&self, slug: &str) -> StoreResult<Option<Event>>;
    async fn update_event(&self, id: Uuid, changes: EventChanges) -> StoreResult<Option<Event>>;
    /// Events ordered by start date, plus the total matching count.
    async fn list_events(&self, listing: Listing, page: Page) -> StoreResult<(Vec<Event>, i64)>;
    async fn list_events_by_owner(&self, user_id: &str) -> StoreResult<Vec<Event>>;
    /// Case-insensitive match on title or description of active events.
    async fn search_events(&self, query: &str, page: Page) -> StoreResult<(Vec<Event>, i64)>;
    async fn search_events_by_town(&self, town: &str, page: Page)
        -> StoreResult<(Vec<Event>, i64)>;
    /// Marks the event and its prices and galleries deleted at `at`.
    async fn soft_delete_event(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool>;
    async fn delete_event(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait PriceStore: Send + Sync {
    async fn insert_price(&self, price: NewPrice) -> StoreResult<Price>;
    async fn find_price(&self, id: Uuid) -> StoreResult<Option<Price>>;
    async fn update_price(&self, id: Uuid, changes: PriceChanges) -> StoreResult<Option<Price>>;
    async fn prices_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Price>>;
    async fn list_prices(&self, listing: Listing) -> StoreResult<Vec<Price>>;
    /// Soft-deletes every active price of an event. Payments keep pointing
    /// at the retired rows.
    async fn retire_prices_for_event(&self, event_id: Uuid, at: DateTime<Utc>)
        -> StoreResult<u64>;
    /// Adds `quantity` to the running order total, only while it stays
    /// within capacity. `None` means the reservation did not fit.
    async fn reserve_price(&self, id: Uuid, quantity: i32) -> StoreResult<Option<Price>>;
    async fn soft_delete_price(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool>;
    async fn delete_price(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait GalleryStore: Send + Sync {
    async fn insert_gallery(&self, gallery: NewGallery) -> StoreResult<Gallery>;
    async fn find_gallery(&self, id: Uuid) -> StoreResult<Option<Gallery>>;
    async fn update_gallery(&self, id: Uuid, changes: GalleryChanges)
        -> StoreResult<Option<Gallery>>;
    async fn galleries_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Gallery>>;
    async fn list_galleries(&self, listing: Listing) -> StoreResult<Vec<Gallery>>;
    async fn retire_galleries_for_event(
        &self,
        event_id: Uuid,
        at: DateTime<Utc>,
    ) -> StoreResult<u64>;
    async fn soft_delete_gallery(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool>;
    async fn delete_gallery(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait AttendeeStore: Send + Sync {
    async fn insert_attendee(&self, attendee: NewAttendee) -> StoreResult<Attendee>;
    async fn find_attendee(&self, id: Uuid) -> StoreResult<Option<Attendee>>;
    async fn find_attendee_by_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> StoreResult<Option<Attendee>>;
    async fn find_attendee_by_phone(
        &self,
        event_id: Uuid,
        phone: &str,
    ) -> StoreResult<Option<Attendee>>;
    async fn update_attendee(
        &self,
        id: Uuid,
        changes: AttendeeChanges,
    ) -> StoreResult<Option<Attendee>>;
    async fn attendees_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Attendee>>;
    async fn list_attendees(&self, listing: Listing) -> StoreResult<Vec<Attendee>>;
    async fn soft_delete_attendee(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool>;
    async fn delete_attendee(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait InvitationStore: Send + Sync {
    async fn insert_invitation(&self, invitation: NewInvitation) -> StoreResult<Invitation>;
    async fn find_invitation(&self, id: Uuid) -> StoreResult<Option<Invitation>>;
    async fn find_invitation_by_token(&self, token: &str) -> StoreResult<Option<Invitation>>;
    async fn update_invitation(
        &self,
        id: Uuid,
        changes: InvitationChanges,
    ) -> StoreResult<Option<Invitation>>;
    async fn invitations_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Invitation>>;
    async fn list_invitations(&self, listing: Listing) -> StoreResult<Vec<Invitation>>;
    async fn search_invitations(&self, filter: &InvitationSearch) -> StoreResult<Vec<Invitation>>;
    /// Flips `accepted` from false to true. Returns false when another
    /// request got there first.
    async fn mark_invitation_accepted(&self, id: Uuid) -> StoreResult<bool>;
    async fn soft_delete_invitation(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool>;
    async fn delete_invitation(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn insert_chat_room(&self, event_id: Uuid, event_name: &str) -> StoreResult<ChatRoom>;
    async fn find_chat_room(&self, id: Uuid) -> StoreResult<Option<ChatRoom>>;
    async fn find_chat_room_by_event(&self, event_id: Uuid) -> StoreResult<Option<ChatRoom>>;
    async fn update_chat_room(&self, id: Uuid, event_name: &str) -> StoreResult<Option<ChatRoom>>;
    async fn list_chat_rooms(&self, listing: Listing) -> StoreResult<Vec<ChatRoom>>;
    async fn soft_delete_chat_room(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool>;
    async fn delete_chat_room(&self, id: Uuid) -> StoreResult<bool>;

    /// Attaching an existing member is a no-op.
    async fn add_chat_member(&self, room_id: Uuid, attendee_id: Uuid) -> StoreResult<()>;
    async fn chat_members(&self, room_id: Uuid) -> StoreResult<Vec<Attendee>>;

    async fn insert_chat_message(
        &self,
        room_id: Uuid,
        attendee_id: Uuid,
        message: &str,
    ) -> StoreResult<ChatMessage>;
    async fn find_chat_message(&self, id: Uuid) -> StoreResult<Option<ChatMessage>>;
    /// Active messages of a room, oldest first.
    async fn chat_messages(&self, room_id: Uuid) -> StoreResult<Vec<ChatMessage>>;
    async fn search_chat_messages(
        &self,
        room_id: Uuid,
        keyword: &str,
    ) -> StoreResult<Vec<ChatMessage>>;
    async fn update_chat_message(&self, id: Uuid, message: &str)
        -> StoreResult<Option<ChatMessage>>;
    async fn soft_delete_chat_message(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool>;
    async fn delete_chat_message(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert_payment(&self, payment: NewPayment) -> StoreResult<Payment>;
    async fn find_payment_by_reference(&self, reference: &str) -> StoreResult<Option<Payment>>;
    /// Moves a payment from `from` to `to`; `None` if it was not in `from`.
    async fn transition_payment(
        &self,
        reference: &str,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> StoreResult<Option<Payment>>;
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert_tokens(
        &self,
        codes: Vec<String>,
        event_id: Option<Uuid>,
    ) -> StoreResult<Vec<AccessToken>>;
    async fn list_tokens(&self, used: Option<bool>) -> StoreResult<Vec<AccessToken>>;
    async fn find_token_by_code(&self, code: &str) -> StoreResult<Option<AccessToken>>;
    /// Marks an unused token used; `None` if it was already spent.
    async fn redeem_token(&self, code: &str, at: DateTime<Utc>)
        -> StoreResult<Option<AccessToken>>;
}

/// Everything the services need from persistence.
pub trait Store:
    EventStore
    + PriceStore
    + GalleryStore
    + AttendeeStore
    + InvitationStore
    + ChatStore
    + PaymentStore
    + TokenStore
{
}

impl<T> Store for T where
    T: EventStore
        + PriceStore
        + GalleryStore
        + AttendeeStore
        + InvitationStore
        + ChatStore
        + PaymentStore
        + TokenStore
{
}
