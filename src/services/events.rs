use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::clients::{AuthUser, Email, Mailer};
use crate::models::event::{
    EventChanges, EventDetails, EventWithChildren, NewEvent, OwnerEvent, OwnerEvents, SoftDeleted,
};
use crate::models::{Event, Listing};
use crate::store::Store;
use crate::types::event_dtos::{CreateEventRequest, RequestCardsRequest, UpdateEventRequest};
use crate::types::gallery_dtos::GalleryInput;
use crate::types::price_dtos::PriceInput;
use crate::utils::date::{is_past, parse_event_date};
use crate::utils::error::AppError;
use crate::utils::pagination::{Page, Paginated};
use crate::utils::slug::slugify;

use super::{non_empty, present, require_event};

const DUPLICATE_EVENT: &str = "Event has already been created or already exists";

#[derive(Debug, Serialize)]
pub struct CardRequest {
    pub price_id: Uuid,
    pub order_amount: i32,
}

pub struct EventService {
    store: Arc<dyn Store>,
    mailer: Arc<dyn Mailer>,
    operator_email: String,
}

impl EventService {
    pub fn new(store: Arc<dyn Store>, mailer: Arc<dyn Mailer>, operator_email: String) -> Self {
        Self {
            store,
            mailer,
            operator_email,
        }
    }

    pub async fn create(
        &self,
        user: &AuthUser,
        req: CreateEventRequest,
    ) -> Result<EventWithChildren, AppError> {
        let slug = slug_for(&req.title)?;
        if self.store.find_event_by_slug(&slug).await?.is_some() {
            return Err(AppError::bad_request(DUPLICATE_EVENT));
        }

        let start_date = parse_event_date(&req.start_date, "start date")?;
        let end_date = present(req.end_date.as_deref())
            .map(|raw| parse_event_date(raw, "end date"))
            .transpose()?;

        let event = self
            .store
            .insert_event(NewEvent {
                user_id: user.id.clone(),
                title: req.title.trim().to_string(),
                slug,
                description: req.description,
                location: req.location,
                town: req.town,
                image: req.image,
                start_date,
                end_date,
            })
            .await?;

        self.insert_children(event.id, req.prices, req.galleries)
            .await?;
        info!(event_id = %event.id, slug = %event.slug, "Event created");

        self.with_children(event).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateEventRequest,
    ) -> Result<EventWithChildren, AppError> {
        let existing = self
            .store
            .find_event(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        let mut changes = EventChanges {
            description: req.description,
            location: req.location,
            town: req.town,
            image: req.image,
            ..Default::default()
        };

        if let Some(title) = present(req.title.as_deref()) {
            let slug = slug_for(title)?;
            if slug != existing.slug {
                let taken = self.store.find_event_by_slug(&slug).await?;
                if taken.is_some_and(|other| other.id != id) {
                    return Err(AppError::bad_request(DUPLICATE_EVENT));
                }
            }
            changes.title = Some(title.to_string());
            changes.slug = Some(slug);
        }

        if let Some(raw) = present(req.start_date.as_deref()) {
            changes.start_date = Some(parse_event_date(raw, "start date")?);
        }
        if let Some(raw) = present(req.end_date.as_deref()) {
            changes.end_date = Some(parse_event_date(raw, "end date")?);
        }

        let event = self
            .store
            .update_event(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        let now = Utc::now();
        if !req.prices.is_empty() {
            self.store.retire_prices_for_event(id, now).await?;
        }
        if !req.galleries.is_empty() {
            self.store.retire_galleries_for_event(id, now).await?;
        }
        self.insert_children(id, req.prices, req.galleries).await?;

        self.with_children(event).await
    }

    pub async fn get_one(&self, id: Uuid) -> Result<EventDetails, AppError> {
        let event = require_event(self.store.as_ref(), id).await?;

        let (prices, galleries, attendees, room) = tokio::try_join!(
            self.store.prices_for_event(id),
            self.store.galleries_for_event(id),
            self.store.attendees_for_event(id),
            self.store.find_chat_room_by_event(id),
        )?;

        let mut chats = match room {
            Some(room) => self.store.chat_messages(room.id).await?,
            None => Vec::new(),
        };
        chats.sort_by_key(|message| message.updated_at);

        let past = is_past(event.start_date, Utc::now());
        Ok(EventDetails {
            event,
            prices,
            galleries,
            attendees,
            chats,
            past,
        })
    }

    pub async fn list(&self, page: Page) -> Result<Paginated<EventWithChildren>, AppError> {
        let (events, total) = self.store.list_events(Listing::Active, page).await?;
        let events = non_empty(events, "No events found")?;

        Ok(Paginated::new(self.attach_children(events).await?, total, page))
    }

    pub async fn list_deleted(&self, page: Page) -> Result<Paginated<Event>, AppError> {
        let (events, total) = self.store.list_events(Listing::Deleted, page).await?;
        let events = non_empty(events, "No deleted events found")?;

        Ok(Paginated::new(events, total, page))
    }

    pub async fn list_mine(&self, user: &AuthUser, page: Page) -> Result<OwnerEvents, AppError> {
        let events: Vec<Event> = self
            .store
            .list_events_by_owner(&user.id)
            .await?
            .into_iter()
            .skip(page.skip())
            .take(page.limit as usize)
            .collect();

        let all = try_join_all(events.into_iter().map(|event| self.owner_event(event))).await?;

        let now = Utc::now();
        let (past, upcoming): (Vec<OwnerEvent>, Vec<OwnerEvent>) = all
            .iter()
            .cloned()
            .partition(|item| is_past(item.event.start_date, now));

        Ok(OwnerEvents {
            count: all.len(),
            all,
            upcoming,
            past,
        })
    }

    pub async fn search(
        &self,
        query: Option<&str>,
        page: Page,
    ) -> Result<Paginated<EventWithChildren>, AppError> {
        let query = present(query).ok_or_else(|| AppError::bad_request("Search query is required"))?;

        let (events, total) = self.store.search_events(query, page).await?;
        let events = non_empty(events, "No events found")?;

        Ok(Paginated::new(self.attach_children(events).await?, total, page))
    }

    pub async fn search_by_town(
        &self,
        query: Option<&str>,
        page: Page,
    ) -> Result<Paginated<EventWithChildren>, AppError> {
        let town = present(query).ok_or_else(|| AppError::bad_request("Town is required"))?;

        let (events, total) = self.store.search_events_by_town(town, page).await?;
        let events = non_empty(events, "No events found in this town")?;

        Ok(Paginated::new(self.attach_children(events).await?, total, page))
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<SoftDeleted, AppError> {
        let deleted_at = Utc::now();
        if !self.store.soft_delete_event(id, deleted_at).await? {
            return Err(AppError::not_found("Event not found"));
        }

        info!(event_id = %id, "Event soft-deleted");
        Ok(SoftDeleted { id, deleted_at })
    }

    pub async fn hard_delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_event(id).await? {
            return Err(AppError::not_found("Event not found"));
        }

        info!(event_id = %id, "Event permanently deleted");
        Ok(())
    }

    /// Reserves cards against a ticket price and notifies the operator and
    /// the requester.
    pub async fn request_cards(
        &self,
        user: &AuthUser,
        req: RequestCardsRequest,
    ) -> Result<CardRequest, AppError> {
        let price = self
            .store
            .find_price(req.event_price_id)
            .await?
            .filter(|price| price.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Price not found"))?;

        // Capacity is checked by the reservation itself, before anyone is mailed.
        let reserved = self
            .store
            .reserve_price(price.id, req.order_amount)
            .await?
            .ok_or_else(|| AppError::bad_request("Maximum amount reached"))?;

        let total = reserved.order_amount;
        let requester = user.fullname.as_deref().unwrap_or(&user.email);

        self.mailer
            .send(Email::new(
                &self.operator_email,
                format!("Card request: {}", price.title),
                format!(
                    "{requester} ({}) requested {} card(s) for \"{}\". Total ordered: {total}.",
                    user.email, req.order_amount, price.title
                ),
            ))
            .await?;
        self.mailer
            .send(Email::new(
                &user.email,
                "Your card request has been received",
                format!(
                    "Hello {requester}, we received your request for {} card(s) for \"{}\".",
                    req.order_amount, price.title
                ),
            ))
            .await?;

        Ok(CardRequest {
            price_id: reserved.id,
            order_amount: reserved.order_amount,
        })
    }

    async fn insert_children(
        &self,
        event_id: Uuid,
        prices: Vec<PriceInput>,
        galleries: Vec<GalleryInput>,
    ) -> Result<(), AppError> {
        for price in prices {
            self.store.insert_price(price.for_event(event_id)).await?;
        }
        for gallery in galleries {
            self.store.insert_gallery(gallery.for_event(event_id)).await?;
        }
        Ok(())
    }

    async fn with_children(&self, event: Event) -> Result<EventWithChildren, AppError> {
        let (prices, galleries) = tokio::try_join!(
            self.store.prices_for_event(event.id),
            self.store.galleries_for_event(event.id),
        )?;

        Ok(EventWithChildren {
            event,
            prices,
            galleries,
        })
    }

    async fn attach_children(
        &self,
        events: Vec<Event>,
    ) -> Result<Vec<EventWithChildren>, AppError> {
        try_join_all(events.into_iter().map(|event| self.with_children(event))).await
    }

    async fn owner_event(&self, event: Event) -> Result<OwnerEvent, AppError> {
        let (prices, galleries, attendees) = tokio::try_join!(
            self.store.prices_for_event(event.id),
            self.store.galleries_for_event(event.id),
            self.store.attendees_for_event(event.id),
        )?;

        Ok(OwnerEvent {
            event,
            prices,
            galleries,
            attendees,
        })
    }
}

fn slug_for(title: &str) -> Result<String, AppError> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(AppError::ValidationError(
            "Title must contain letters or digits".to_string(),
        ));
    }
    Ok(slug)
}
