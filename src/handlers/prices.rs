use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::extractors::{Path, ValidatedJson};
use crate::state::AppState;
use crate::types::price_dtos::{CreatePriceRequest, UpdatePriceRequest};
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn create_price(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePriceRequest>,
) -> Result<Response, AppError> {
    let price = state.prices().create(req).await?;
    Ok(created(price, "Price created successfully"))
}

pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdatePriceRequest>,
) -> Result<Response, AppError> {
    let price = state.prices().update(id, req).await?;
    Ok(success(price, "Price updated successfully"))
}

pub async fn prices_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let prices = state.prices().list_by_event(event_id).await?;
    Ok(success(prices, "Prices retrieved successfully"))
}

pub async fn get_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let price = state.prices().get_one(id).await?;
    Ok(success(price, "Price retrieved successfully"))
}

pub async fn list_prices(State(state): State<AppState>) -> Result<Response, AppError> {
    let prices = state.prices().list().await?;
    Ok(success(prices, "Prices retrieved successfully"))
}

pub async fn list_deleted_prices(State(state): State<AppState>) -> Result<Response, AppError> {
    let prices = state.prices().list_deleted().await?;
    Ok(success(prices, "Deleted prices retrieved successfully"))
}

pub async fn soft_delete_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = state.prices().soft_delete(id).await?;
    Ok(success(deleted, "Price deleted successfully"))
}

pub async fn hard_delete_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.prices().hard_delete(id).await?;
    Ok(empty_success("Price permanently deleted"))
}
