use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::models::event::SoftDeleted;
use crate::models::{Listing, Price};
use crate::store::Store;
use crate::types::price_dtos::{CreatePriceRequest, UpdatePriceRequest};
use crate::utils::error::AppError;

use super::{non_empty, require_event};

pub struct PriceService {
    store: Arc<dyn Store>,
}

impl PriceService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: CreatePriceRequest) -> Result<Price, AppError> {
        require_event(self.store.as_ref(), req.event_id).await?;
        Ok(self.store.insert_price(req.into()).await?)
    }

    pub async fn update(&self, id: Uuid, req: UpdatePriceRequest) -> Result<Price, AppError> {
        self.store
            .update_price(id, req.into())
            .await?
            .ok_or_else(|| AppError::not_found("Price not found"))
    }

    pub async fn get_one(&self, id: Uuid) -> Result<Price, AppError> {
        self.store
            .find_price(id)
            .await?
            .ok_or_else(|| AppError::not_found("Price not found"))
    }

    pub async fn list(&self) -> Result<Vec<Price>, AppError> {
        non_empty(
            self.store.list_prices(Listing::Active).await?,
            "No prices found",
        )
    }

    pub async fn list_deleted(&self) -> Result<Vec<Price>, AppError> {
        non_empty(
            self.store.list_prices(Listing::Deleted).await?,
            "No deleted prices found",
        )
    }

    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Price>, AppError> {
        require_event(self.store.as_ref(), event_id).await?;
        non_empty(
            self.store.prices_for_event(event_id).await?,
            "No prices found for this event",
        )
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<SoftDeleted, AppError> {
        let deleted_at = Utc::now();
        if !self.store.soft_delete_price(id, deleted_at).await? {
            return Err(AppError::not_found("Price not found"));
        }
        Ok(SoftDeleted { id, deleted_at })
    }

    pub async fn hard_delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_price(id).await? {
            return Err(AppError::not_found("Price not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, seed_event};
    use rust_decimal::Decimal;

    fn request(event_id: Uuid, title: &str) -> CreatePriceRequest {
        CreatePriceRequest {
            event_id,
            title: title.to_string(),
            description: Some("Front rows".to_string()),
            amount: Decimal::new(2500, 2),
            attendees: Some(40),
            with_chips: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_live_event() {
        let ctx = context();
        let err = ctx
            .state
            .prices()
            .create(request(Uuid::new_v4(), "VIP"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Event not found"));
    }

    #[tokio::test]
    async fn test_create_update_and_list_by_event() {
        let ctx = context();
        let event = seed_event(&ctx.state, "Comedy Night").await;
        let prices = ctx.state.prices();

        let created = prices.create(request(event.event.id, "VIP")).await.unwrap();
        assert_eq!(created.order_amount, 0);

        let updated = prices
            .update(
                created.id,
                UpdatePriceRequest {
                    amount: Some(Decimal::new(30, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, Decimal::new(30, 0));
        assert_eq!(updated.title, "VIP");

        let listed = prices.list_by_event(event.event.id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_soft_deleted_prices_move_between_listings() {
        let ctx = context();
        let event = seed_event(&ctx.state, "Quiz").await;
        let prices = ctx.state.prices();
        let created = prices.create(request(event.event.id, "Team")).await.unwrap();

        prices.soft_delete(created.id).await.unwrap();

        assert!(matches!(prices.list().await, Err(AppError::NotFound(_))));
        assert_eq!(prices.list_deleted().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_price_is_not_found() {
        let ctx = context();
        let prices = ctx.state.prices();
        assert!(matches!(
            prices.get_one(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            prices.hard_delete(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
