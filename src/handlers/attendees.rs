use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::extractors::{Path, ValidatedJson};
use crate::state::AppState;
use crate::types::attendee_dtos::{CreateAttendeeRequest, UpdateAttendeeRequest};
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn create_attendee(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAttendeeRequest>,
) -> Result<Response, AppError> {
    let attendee = state.attendees().create(req).await?;
    Ok(created(attendee, "Attendee created successfully"))
}

pub async fn update_attendee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateAttendeeRequest>,
) -> Result<Response, AppError> {
    let attendee = state.attendees().update(id, req).await?;
    Ok(success(attendee, "Attendee updated successfully"))
}

pub async fn attendees_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let attendees = state.attendees().list_by_event(event_id).await?;
    Ok(success(attendees, "Attendees retrieved successfully"))
}

pub async fn get_attendee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let attendee = state.attendees().get_one(id).await?;
    Ok(success(attendee, "Attendee retrieved successfully"))
}

pub async fn list_attendees(State(state): State<AppState>) -> Result<Response, AppError> {
    let attendees = state.attendees().list().await?;
    Ok(success(attendees, "Attendees retrieved successfully"))
}

pub async fn list_deleted_attendees(State(state): State<AppState>) -> Result<Response, AppError> {
    let attendees = state.attendees().list_deleted().await?;
    Ok(success(attendees, "Deleted attendees retrieved successfully"))
}

pub async fn check_in_attendee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let attendee = state.attendees().check_in(id).await?;
    Ok(success(attendee, "Attendee checked in successfully"))
}

pub async fn send_thank_you(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let attendee = state.attendees().send_thank_you(id).await?;
    Ok(success(attendee, "Thank you email sent successfully"))
}

pub async fn soft_delete_attendee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = state.attendees().soft_delete(id).await?;
    Ok(success(deleted, "Attendee deleted successfully"))
}

pub async fn hard_delete_attendee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.attendees().hard_delete(id).await?;
    Ok(empty_success("Attendee permanently deleted"))
}
