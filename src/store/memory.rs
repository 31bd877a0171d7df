//! In-memory store for service and router tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    AttendeeStore, ChatStore, EventStore, GalleryStore, InvitationStore, PaymentStore,
    PriceStore, StoreResult, TokenStore,
};
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

#[derive(Default)]
struct Tables {
    events: Vec<Event>,
    prices: Vec<Price>,
    galleries: Vec<Gallery>,
    attendees: Vec<Attendee>,
    invitations: Vec<Invitation>,
    chat_rooms: Vec<ChatRoom>,
    chat_members: Vec<(Uuid, Uuid)>,
    chat_messages: Vec<ChatMessage>,
    payments: Vec<Payment>,
    tokens: Vec<AccessToken>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

fn unique_violation(constraint: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!(
        "duplicate key value violates unique constraint \"{constraint}\""
    ))
}

fn in_listing(deleted_at: Option<DateTime<Utc>>, listing: Listing) -> bool {
    match listing {
        Listing::Active => deleted_at.is_none(),
        Listing::Deleted => deleted_at.is_some(),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate(mut rows: Vec<Event>, page: Page) -> (Vec<Event>, i64) {
    rows.sort_by_key(|event| event.start_date);
    let total = rows.len() as i64;
    let rows = rows
        .into_iter()
        .skip(page.skip())
        .take(page.limit as usize)
        .collect();
    (rows, total)
}

fn replace<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn replace_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn insert_event(&self, event: NewEvent) -> StoreResult<Event> {
        let mut tables = self.tables();
        if tables.events.iter().any(|e| e.slug == event.slug) {
            return Err(unique_violation("events_slug_key"));
        }

        let now = Utc::now();
        let row = Event {
            id: Uuid::new_v4(),
            user_id: event.user_id,
            title: event.title,
            slug: event.slug,
            description: event.description,
            location: event.location,
            town: event.town,
            image: event.image,
            start_date: event.start_date,
            end_date: event.end_date,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.events.push(row.clone());
        Ok(row)
    }

    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self.tables().events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_event_by_slug(&self, slug: &str) -> StoreResult<Option<Event>> {
        Ok(self.tables().events.iter().find(|e| e.slug == slug).cloned())
    }

    async fn update_event(&self, id: Uuid, changes: EventChanges) -> StoreResult<Option<Event>> {
        let mut tables = self.tables();
        let Some(event) = tables.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        replace(&mut event.title, changes.title);
        replace(&mut event.slug, changes.slug);
        replace_opt(&mut event.description, changes.description);
        replace(&mut event.location, changes.location);
        replace(&mut event.town, changes.town);
        replace_opt(&mut event.image, changes.image);
        replace(&mut event.start_date, changes.start_date);
        replace_opt(&mut event.end_date, changes.end_date);
        event.updated_at = Utc::now();
        Ok(Some(event.clone()))
    }

    async fn list_events(&self, listing: Listing, page: Page) -> StoreResult<(Vec<Event>, i64)> {
        let rows = self
            .tables()
            .events
            .iter()
            .filter(|e| in_listing(e.deleted_at, listing))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn list_events_by_owner(&self, user_id: &str) -> StoreResult<Vec<Event>> {
        let mut rows: Vec<Event> = self
            .tables()
            .events
            .iter()
            .filter(|e| e.user_id == user_id && e.deleted_at.is_none())
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.start_date);
        Ok(rows)
    }

    async fn search_events(&self, query: &str, page: Page) -> StoreResult<(Vec<Event>, i64)> {
        let rows = self
            .tables()
            .events
            .iter()
            .filter(|e| e.deleted_at.is_none())
            .filter(|e| {
                contains_ci(&e.title, query)
                    || e.description.as_deref().is_some_and(|d| contains_ci(d, query))
            })
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn search_events_by_town(
        &self,
        town: &str,
        page: Page,
    ) -> StoreResult<(Vec<Event>, i64)> {
        let rows = self
            .tables()
            .events
            .iter()
            .filter(|e| e.deleted_at.is_none() && contains_ci(&e.town, town))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn soft_delete_event(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut tables = self.tables();
        let Some(event) = tables.events.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        event.deleted_at = Some(at);

        for price in tables.prices.iter_mut().filter(|p| p.event_id == id) {
            price.deleted_at = Some(at);
        }
        for gallery in tables.galleries.iter_mut().filter(|g| g.event_id == id) {
            gallery.deleted_at = Some(at);
        }
        Ok(true)
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables();
        let before = tables.events.len();
        tables.events.retain(|e| e.id != id);
        if tables.events.len() == before {
            return Ok(false);
        }

        let rooms: Vec<Uuid> = tables
            .chat_rooms
            .iter()
            .filter(|r| r.event_id == id)
            .map(|r| r.id)
            .collect();
        let prices: Vec<Uuid> = tables
            .prices
            .iter()
            .filter(|p| p.event_id == id)
            .map(|p| p.id)
            .collect();

        tables.prices.retain(|p| p.event_id != id);
        tables.galleries.retain(|g| g.event_id != id);
        tables.attendees.retain(|a| a.event_id != id);
        tables.invitations.retain(|i| i.event_id != id);
        tables.chat_rooms.retain(|r| r.event_id != id);
        tables.chat_members.retain(|(room, _)| !rooms.contains(room));
        tables.chat_messages.retain(|m| !rooms.contains(&m.chat_room_id));
        tables.payments.retain(|p| !prices.contains(&p.price_id));
        tables.tokens.retain(|t| t.event_id != Some(id));
        Ok(true)
    }
}

#[async_trait]
impl PriceStore for MemoryStore {
    async fn insert_price(&self, price: NewPrice) -> StoreResult<Price> {
        let now = Utc::now();
        let row = Price {
            id: Uuid::new_v4(),
            event_id: price.event_id,
            title: price.title,
            description: price.description,
            amount: price.amount,
            attendees: price.attendees,
            order_amount: 0,
            with_chips: Some(price.with_chips.unwrap_or_else(|| "without".to_string())),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.tables().prices.push(row.clone());
        Ok(row)
    }

    async fn find_price(&self, id: Uuid) -> StoreResult<Option<Price>> {
        Ok(self.tables().prices.iter().find(|p| p.id == id).cloned())
    }

    async fn update_price(&self, id: Uuid, changes: PriceChanges) -> StoreResult<Option<Price>> {
        let mut tables = self.tables();
        let Some(price) = tables.prices.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        replace(&mut price.title, changes.title);
        replace_opt(&mut price.description, changes.description);
        replace(&mut price.amount, changes.amount);
        replace_opt(&mut price.attendees, changes.attendees);
        replace_opt(&mut price.with_chips, changes.with_chips);
        price.updated_at = Utc::now();
        Ok(Some(price.clone()))
    }

    async fn prices_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Price>> {
        let mut rows: Vec<Price> = self
            .tables()
            .prices
            .iter()
            .filter(|p| p.event_id == event_id && p.deleted_at.is_none())
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.amount);
        Ok(rows)
    }

    async fn list_prices(&self, listing: Listing) -> StoreResult<Vec<Price>> {
        Ok(self
            .tables()
            .prices
            .iter()
            .filter(|p| in_listing(p.deleted_at, listing))
            .cloned()
            .collect())
    }

    async fn retire_prices_for_event(
        &self,
        event_id: Uuid,
        at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let mut retired = 0;
        for price in self
            .tables()
            .prices
            .iter_mut()
            .filter(|p| p.event_id == event_id && p.deleted_at.is_none())
        {
            price.deleted_at = Some(at);
            price.updated_at = at;
            retired += 1;
        }
        Ok(retired)
    }

    async fn reserve_price(&self, id: Uuid, quantity: i32) -> StoreResult<Option<Price>> {
        let mut tables = self.tables();
        let Some(price) = tables.prices.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if !price.can_reserve(quantity) {
            return Ok(None);
        }

        price.order_amount += quantity;
        price.updated_at = Utc::now();
        Ok(Some(price.clone()))
    }

    async fn soft_delete_price(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut tables = self.tables();
        Ok(match tables.prices.iter_mut().find(|p| p.id == id) {
            Some(price) => {
                price.deleted_at = Some(at);
                true
            }
            None => false,
        })
    }

    async fn delete_price(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables();
        let before = tables.prices.len();
        tables.prices.retain(|p| p.id != id);
        tables.payments.retain(|p| p.price_id != id);
        Ok(tables.prices.len() < before)
    }
}

#[async_trait]
impl GalleryStore for MemoryStore {
    async fn insert_gallery(&self, gallery: NewGallery) -> StoreResult<Gallery> {
        let now = Utc::now();
        let row = Gallery {
            id: Uuid::new_v4(),
            event_id: gallery.event_id,
            name: gallery.name,
            image: gallery.image,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.tables().galleries.push(row.clone());
        Ok(row)
    }

    async fn find_gallery(&self, id: Uuid) -> StoreResult<Option<Gallery>> {
        Ok(self.tables().galleries.iter().find(|g| g.id == id).cloned())
    }

    async fn update_gallery(
        &self,
        id: Uuid,
        changes: GalleryChanges,
    ) -> StoreResult<Option<Gallery>> {
        let mut tables = self.tables();
        let Some(gallery) = tables.galleries.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };

        replace(&mut gallery.name, changes.name);
        replace_opt(&mut gallery.image, changes.image);
        gallery.updated_at = Utc::now();
        Ok(Some(gallery.clone()))
    }

    async fn galleries_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Gallery>> {
        Ok(self
            .tables()
            .galleries
            .iter()
            .filter(|g| g.event_id == event_id && g.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn list_galleries(&self, listing: Listing) -> StoreResult<Vec<Gallery>> {
        Ok(self
            .tables()
            .galleries
            .iter()
            .filter(|g| in_listing(g.deleted_at, listing))
            .cloned()
            .collect())
    }

    async fn retire_galleries_for_event(
        &self,
        event_id: Uuid,
        at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let mut retired = 0;
        for gallery in self
            .tables()
            .galleries
            .iter_mut()
            .filter(|g| g.event_id == event_id && g.deleted_at.is_none())
        {
            gallery.deleted_at = Some(at);
            gallery.updated_at = at;
            retired += 1;
        }
        Ok(retired)
    }

    async fn soft_delete_gallery(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut tables = self.tables();
        Ok(match tables.galleries.iter_mut().find(|g| g.id == id) {
            Some(gallery) => {
                gallery.deleted_at = Some(at);
                true
            }
            None => false,
        })
    }

    async fn delete_gallery(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables();
        let before = tables.galleries.len();
        tables.galleries.retain(|g| g.id != id);
        Ok(tables.galleries.len() < before)
    }
}

#[async_trait]
impl AttendeeStore for MemoryStore {
    async fn insert_attendee(&self, attendee: NewAttendee) -> StoreResult<Attendee> {
        let mut tables = self.tables();
        if let Some(email) = &attendee.email {
            let taken = tables
                .attendees
                .iter()
                .any(|a| a.event_id == attendee.event_id && a.email.as_ref() == Some(email));
            if taken {
                return Err(unique_violation("idx_attendees_event_email"));
            }
        }

        let now = Utc::now();
        let row = Attendee {
            id: Uuid::new_v4(),
            event_id: attendee.event_id,
            event_name: attendee.event_name,
            name: attendee.name,
            email: attendee.email,
            phone: attendee.phone,
            image: attendee.image,
            price_category: attendee.price_category,
            ticket: attendee.ticket,
            link: attendee.link,
            token: attendee.token,
            checked_in: false,
            thank_you_sent: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.attendees.push(row.clone());
        Ok(row)
    }

    async fn find_attendee(&self, id: Uuid) -> StoreResult<Option<Attendee>> {
        Ok(self.tables().attendees.iter().find(|a| a.id == id).cloned())
    }

    async fn find_attendee_by_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> StoreResult<Option<Attendee>> {
        Ok(self
            .tables()
            .attendees
            .iter()
            .find(|a| a.event_id == event_id && a.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_attendee_by_phone(
        &self,
        event_id: Uuid,
        phone: &str,
    ) -> StoreResult<Option<Attendee>> {
        Ok(self
            .tables()
            .attendees
            .iter()
            .find(|a| a.event_id == event_id && a.phone.as_deref() == Some(phone))
            .cloned())
    }

    async fn update_attendee(
        &self,
        id: Uuid,
        changes: AttendeeChanges,
    ) -> StoreResult<Option<Attendee>> {
        let mut tables = self.tables();
        let Some(attendee) = tables.attendees.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        replace_opt(&mut attendee.event_name, changes.event_name);
        replace_opt(&mut attendee.name, changes.name);
        replace_opt(&mut attendee.email, changes.email);
        replace_opt(&mut attendee.phone, changes.phone);
        replace_opt(&mut attendee.image, changes.image);
        replace_opt(&mut attendee.price_category, changes.price_category);
        replace_opt(&mut attendee.ticket, changes.ticket);
        replace_opt(&mut attendee.link, changes.link);
        replace(&mut attendee.checked_in, changes.checked_in);
        replace(&mut attendee.thank_you_sent, changes.thank_you_sent);
        attendee.updated_at = Utc::now();
        Ok(Some(attendee.clone()))
    }

    async fn attendees_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Attendee>> {
        Ok(self
            .tables()
            .attendees
            .iter()
            .filter(|a| a.event_id == event_id && a.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn list_attendees(&self, listing: Listing) -> StoreResult<Vec<Attendee>> {
        Ok(self
            .tables()
            .attendees
            .iter()
            .filter(|a| in_listing(a.deleted_at, listing))
            .cloned()
            .collect())
    }

    async fn soft_delete_attendee(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut tables = self.tables();
        Ok(match tables.attendees.iter_mut().find(|a| a.id == id) {
            Some(attendee) => {
                attendee.deleted_at = Some(at);
                true
            }
            None => false,
        })
    }

    async fn delete_attendee(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables();
        let before = tables.attendees.len();
        tables.attendees.retain(|a| a.id != id);
        tables.chat_members.retain(|(_, attendee)| *attendee != id);
        tables.chat_messages.retain(|m| m.attendee_id != id);
        Ok(tables.attendees.len() < before)
    }
}

#[async_trait]
impl InvitationStore for MemoryStore {
    async fn insert_invitation(&self, invitation: NewInvitation) -> StoreResult<Invitation> {
        let mut tables = self.tables();
        if tables.invitations.iter().any(|i| i.token == invitation.token) {
            return Err(unique_violation("invitations_token_key"));
        }

        let now = Utc::now();
        let row = Invitation {
            id: Uuid::new_v4(),
            event_id: invitation.event_id,
            invitation_name: invitation.invitation_name,
            invitation_desc: invitation.invitation_desc,
            event_name: invitation.event_name,
            invitee_name: invitation.invitee_name,
            invitee_email: invitation.invitee_email,
            invitee_phone: invitation.invitee_phone,
            token: invitation.token,
            is_reusable: invitation.is_reusable,
            accepted: (!invitation.is_reusable).then_some(false),
            invite_link: invitation.invite_link,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.invitations.push(row.clone());
        Ok(row)
    }

    async fn find_invitation(&self, id: Uuid) -> StoreResult<Option<Invitation>> {
        Ok(self.tables().invitations.iter().find(|i| i.id == id).cloned())
    }

    async fn find_invitation_by_token(&self, token: &str) -> StoreResult<Option<Invitation>> {
        Ok(self
            .tables()
            .invitations
            .iter()
            .find(|i| i.token == token)
            .cloned())
    }

    async fn update_invitation(
        &self,
        id: Uuid,
        changes: InvitationChanges,
    ) -> StoreResult<Option<Invitation>> {
        let mut tables = self.tables();
        let Some(invitation) = tables.invitations.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        replace(&mut invitation.invitation_name, changes.invitation_name);
        replace_opt(&mut invitation.invitation_desc, changes.invitation_desc);
        replace(&mut invitation.event_name, changes.event_name);
        replace_opt(&mut invitation.invitee_name, changes.invitee_name);
        replace_opt(&mut invitation.invitee_email, changes.invitee_email);
        replace_opt(&mut invitation.invitee_phone, changes.invitee_phone);
        invitation.updated_at = Utc::now();
        Ok(Some(invitation.clone()))
    }

    async fn invitations_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Invitation>> {
        Ok(self
            .tables()
            .invitations
            .iter()
            .filter(|i| i.event_id == event_id && i.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn list_invitations(&self, listing: Listing) -> StoreResult<Vec<Invitation>> {
        Ok(self
            .tables()
            .invitations
            .iter()
            .filter(|i| in_listing(i.deleted_at, listing))
            .cloned()
            .collect())
    }

    async fn search_invitations(&self, filter: &InvitationSearch) -> StoreResult<Vec<Invitation>> {
        Ok(self
            .tables()
            .invitations
            .iter()
            .filter(|i| i.deleted_at.is_none())
            .filter(|i| filter.event_id.map_or(true, |id| i.event_id == id))
            .filter(|i| {
                filter
                    .email
                    .as_ref()
                    .map_or(true, |email| i.invitee_email.as_ref() == Some(email))
            })
            .filter(|i| {
                filter
                    .phone
                    .as_ref()
                    .map_or(true, |phone| i.invitee_phone.as_ref() == Some(phone))
            })
            .cloned()
            .collect())
    }

    async fn mark_invitation_accepted(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables();
        match tables.invitations.iter_mut().find(|i| i.id == id) {
            Some(invitation) if !invitation.is_reusable && invitation.accepted == Some(false) => {
                invitation.accepted = Some(true);
                invitation.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn soft_delete_invitation(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut tables = self.tables();
        Ok(match tables.invitations.iter_mut().find(|i| i.id == id) {
            Some(invitation) => {
                invitation.deleted_at = Some(at);
                true
            }
            None => false,
        })
    }

    async fn delete_invitation(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables();
        let before = tables.invitations.len();
        tables.invitations.retain(|i| i.id != id);
        tables.payments.retain(|p| p.invitation_id != id);
        Ok(tables.invitations.len() < before)
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn insert_chat_room(&self, event_id: Uuid, event_name: &str) -> StoreResult<ChatRoom> {
        let mut tables = self.tables();
        if tables.chat_rooms.iter().any(|r| r.event_id == event_id) {
            return Err(unique_violation("chat_rooms_event_id_key"));
        }

        let now = Utc::now();
        let row = ChatRoom {
            id: Uuid::new_v4(),
            event_id,
            event_name: event_name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.chat_rooms.push(row.clone());
        Ok(row)
    }

    async fn find_chat_room(&self, id: Uuid) -> StoreResult<Option<ChatRoom>> {
        Ok(self.tables().chat_rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn find_chat_room_by_event(&self, event_id: Uuid) -> StoreResult<Option<ChatRoom>> {
        Ok(self
            .tables()
            .chat_rooms
            .iter()
            .find(|r| r.event_id == event_id)
            .cloned())
    }

    async fn update_chat_room(&self, id: Uuid, event_name: &str) -> StoreResult<Option<ChatRoom>> {
        let mut tables = self.tables();
        let Some(room) = tables.chat_rooms.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        room.event_name = event_name.to_string();
        room.updated_at = Utc::now();
        Ok(Some(room.clone()))
    }

    async fn list_chat_rooms(&self, listing: Listing) -> StoreResult<Vec<ChatRoom>> {
        Ok(self
            .tables()
            .chat_rooms
            .iter()
            .filter(|r| in_listing(r.deleted_at, listing))
            .cloned()
            .collect())
    }

    async fn soft_delete_chat_room(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut tables = self.tables();
        Ok(match tables.chat_rooms.iter_mut().find(|r| r.id == id) {
            Some(room) => {
                room.deleted_at = Some(at);
                true
            }
            None => false,
        })
    }

    async fn delete_chat_room(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables();
        let before = tables.chat_rooms.len();
        tables.chat_rooms.retain(|r| r.id != id);
        tables.chat_members.retain(|(room, _)| *room != id);
        tables.chat_messages.retain(|m| m.chat_room_id != id);
        Ok(tables.chat_rooms.len() < before)
    }

    async fn add_chat_member(&self, room_id: Uuid, attendee_id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables();
        if !tables.chat_members.contains(&(room_id, attendee_id)) {
            tables.chat_members.push((room_id, attendee_id));
        }
        Ok(())
    }

    async fn chat_members(&self, room_id: Uuid) -> StoreResult<Vec<Attendee>> {
        let tables = self.tables();
        Ok(tables
            .chat_members
            .iter()
            .filter(|(room, _)| *room == room_id)
            .filter_map(|(_, attendee)| tables.attendees.iter().find(|a| a.id == *attendee))
            .cloned()
            .collect())
    }

    async fn insert_chat_message(
        &self,
        room_id: Uuid,
        attendee_id: Uuid,
        message: &str,
    ) -> StoreResult<ChatMessage> {
        let now = Utc::now();
        let row = ChatMessage {
            id: Uuid::new_v4(),
            chat_room_id: room_id,
            attendee_id,
            message: message.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.tables().chat_messages.push(row.clone());
        Ok(row)
    }

    async fn find_chat_message(&self, id: Uuid) -> StoreResult<Option<ChatMessage>> {
        Ok(self
            .tables()
            .chat_messages
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn chat_messages(&self, room_id: Uuid) -> StoreResult<Vec<ChatMessage>> {
        Ok(self
            .tables()
            .chat_messages
            .iter()
            .filter(|m| m.chat_room_id == room_id && m.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn search_chat_messages(
        &self,
        room_id: Uuid,
        keyword: &str,
    ) -> StoreResult<Vec<ChatMessage>> {
        Ok(self
            .tables()
            .chat_messages
            .iter()
            .filter(|m| m.chat_room_id == room_id && m.deleted_at.is_none())
            .filter(|m| contains_ci(&m.message, keyword))
            .cloned()
            .collect())
    }

    async fn update_chat_message(
        &self,
        id: Uuid,
        message: &str,
    ) -> StoreResult<Option<ChatMessage>> {
        let mut tables = self.tables();
        let Some(row) = tables.chat_messages.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        row.message = message.to_string();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn soft_delete_chat_message(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut tables = self.tables();
        Ok(match tables.chat_messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.deleted_at = Some(at);
                true
            }
            None => false,
        })
    }

    async fn delete_chat_message(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables();
        let before = tables.chat_messages.len();
        tables.chat_messages.retain(|m| m.id != id);
        Ok(tables.chat_messages.len() < before)
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn insert_payment(&self, payment: NewPayment) -> StoreResult<Payment> {
        let mut tables = self.tables();
        if tables.payments.iter().any(|p| p.reference == payment.reference) {
            return Err(unique_violation("payments_reference_key"));
        }

        let now = Utc::now();
        let row = Payment {
            id: Uuid::new_v4(),
            user_id: payment.user_id,
            name: payment.name,
            email: payment.email,
            phone: payment.phone,
            price_id: payment.price_id,
            invitation_id: payment.invitation_id,
            reference: payment.reference,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.payments.push(row.clone());
        Ok(row)
    }

    async fn find_payment_by_reference(&self, reference: &str) -> StoreResult<Option<Payment>> {
        Ok(self
            .tables()
            .payments
            .iter()
            .find(|p| p.reference == reference)
            .cloned())
    }

    async fn transition_payment(
        &self,
        reference: &str,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> StoreResult<Option<Payment>> {
        let mut tables = self.tables();
        match tables.payments.iter_mut().find(|p| p.reference == reference) {
            Some(payment) if payment.status == from => {
                payment.status = to;
                payment.updated_at = Utc::now();
                Ok(Some(payment.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn insert_tokens(
        &self,
        codes: Vec<String>,
        event_id: Option<Uuid>,
    ) -> StoreResult<Vec<AccessToken>> {
        let mut tables = self.tables();
        let now = Utc::now();
        let mut created = Vec::with_capacity(codes.len());

        for code in codes {
            if tables.tokens.iter().any(|t| t.code == code) {
                return Err(unique_violation("access_tokens_code_key"));
            }
            let row = AccessToken {
                id: Uuid::new_v4(),
                code,
                event_id,
                used: false,
                used_at: None,
                created_at: now,
                updated_at: now,
            };
            tables.tokens.push(row.clone());
            created.push(row);
        }
        Ok(created)
    }

    async fn list_tokens(&self, used: Option<bool>) -> StoreResult<Vec<AccessToken>> {
        Ok(self
            .tables()
            .tokens
            .iter()
            .filter(|t| used.map_or(true, |used| t.used == used))
            .cloned()
            .collect())
    }

    async fn find_token_by_code(&self, code: &str) -> StoreResult<Option<AccessToken>> {
        Ok(self.tables().tokens.iter().find(|t| t.code == code).cloned())
    }

    async fn redeem_token(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<AccessToken>> {
        let mut tables = self.tables();
        match tables.tokens.iter_mut().find(|t| t.code == code) {
            Some(token) if !token.used => {
                token.used = true;
                token.used_at = Some(at);
                token.updated_at = at;
                Ok(Some(token.clone()))
            }
            _ => Ok(None),
        }
    }
}
