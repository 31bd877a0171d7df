use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::clients::AuthUser;
use crate::extractors::{Path, Query, ValidatedJson};
use crate::state::AppState;
use crate::types::event_dtos::{
    CreateEventRequest, RequestCardsRequest, SearchQuery, UpdateEventRequest,
};
use crate::utils::error::AppError;
use crate::utils::pagination::PageQuery;
use crate::utils::response::{created, empty_success, success};

pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> Result<Response, AppError> {
    let event = state.events().create(&user, req).await?;
    Ok(created(event, "Event created successfully"))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateEventRequest>,
) -> Result<Response, AppError> {
    let event = state.events().update(id, req).await?;
    Ok(success(event, "Event updated successfully"))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = state.events().get_one(id).await?;
    Ok(success(event, "Event retrieved successfully"))
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let events = state.events().list(query.into()).await?;
    Ok(success(events, "Events retrieved successfully"))
}

pub async fn list_deleted_events(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let events = state.events().list_deleted(query.into()).await?;
    Ok(success(events, "Deleted events retrieved successfully"))
}

pub async fn list_my_events(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let events = state.events().list_mine(&user, query.into()).await?;
    Ok(success(events, "Your events retrieved successfully"))
}

pub async fn search_events(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let events = state
        .events()
        .search(query.query.as_deref(), query.page())
        .await?;
    Ok(success(events, "Events retrieved successfully"))
}

pub async fn search_events_by_town(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let events = state
        .events()
        .search_by_town(query.query.as_deref(), query.page())
        .await?;
    Ok(success(events, "Events retrieved successfully"))
}

pub async fn soft_delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = state.events().soft_delete(id).await?;
    Ok(success(deleted, "Event deleted successfully"))
}

pub async fn hard_delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.events().hard_delete(id).await?;
    Ok(empty_success("Event permanently deleted"))
}

pub async fn request_cards(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<RequestCardsRequest>,
) -> Result<Response, AppError> {
    let request = state.events().request_cards(&user, req).await?;
    Ok(success(request, "Card request received"))
}
