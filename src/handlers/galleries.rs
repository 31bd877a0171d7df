use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::extractors::{Path, ValidatedJson};
use crate::state::AppState;
use crate::types::gallery_dtos::{CreateGalleryRequest, UpdateGalleryRequest};
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn create_gallery(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateGalleryRequest>,
) -> Result<Response, AppError> {
    let gallery = state.galleries().create(req).await?;
    Ok(created(gallery, "Gallery created successfully"))
}

pub async fn update_gallery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateGalleryRequest>,
) -> Result<Response, AppError> {
    let gallery = state.galleries().update(id, req).await?;
    Ok(success(gallery, "Gallery updated successfully"))
}

pub async fn galleries_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let galleries = state.galleries().list_by_event(event_id).await?;
    Ok(success(galleries, "Galleries retrieved successfully"))
}

pub async fn get_gallery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let gallery = state.galleries().get_one(id).await?;
    Ok(success(gallery, "Gallery retrieved successfully"))
}

pub async fn list_galleries(State(state): State<AppState>) -> Result<Response, AppError> {
    let galleries = state.galleries().list().await?;
    Ok(success(galleries, "Galleries retrieved successfully"))
}

pub async fn list_deleted_galleries(State(state): State<AppState>) -> Result<Response, AppError> {
    let galleries = state.galleries().list_deleted().await?;
    Ok(success(galleries, "Deleted galleries retrieved successfully"))
}

pub async fn soft_delete_gallery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = state.galleries().soft_delete(id).await?;
    Ok(success(deleted, "Gallery deleted successfully"))
}

pub async fn hard_delete_gallery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.galleries().hard_delete(id).await?;
    Ok(empty_success("Gallery permanently deleted"))
}
