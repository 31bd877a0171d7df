use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::extractors::{Path, Query, ValidatedJson};
use crate::state::AppState;
use crate::types::invitation_dtos::{
    AcceptInvitationRequest, ContactQuery, CreateInvitationRequest, UpdateInvitationRequest,
};
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn create_invitation(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateInvitationRequest>,
) -> Result<Response, AppError> {
    let invitation = state.invitations().create(req).await?;
    Ok(created(invitation, "Invitation created successfully"))
}

pub async fn update_invitation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateInvitationRequest>,
) -> Result<Response, AppError> {
    let invitation = state.invitations().update(id, req).await?;
    Ok(success(invitation, "Invitation updated successfully"))
}

pub async fn invitations_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let invitations = state.invitations().list_by_event(event_id).await?;
    Ok(success(invitations, "Invitations retrieved successfully"))
}

pub async fn get_invitation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let invitation = state.invitations().get_one(id).await?;
    Ok(success(invitation, "Invitation retrieved successfully"))
}

pub async fn list_invitations(State(state): State<AppState>) -> Result<Response, AppError> {
    let invitations = state.invitations().list().await?;
    Ok(success(invitations, "Invitations retrieved successfully"))
}

pub async fn list_deleted_invitations(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let invitations = state.invitations().list_deleted().await?;
    Ok(success(invitations, "Deleted invitations retrieved successfully"))
}

pub async fn search_invitations(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> Result<Response, AppError> {
    let invitations = state.invitations().search(query).await?;
    Ok(success(invitations, "Invitations retrieved successfully"))
}

pub async fn search_event_invitations(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<ContactQuery>,
) -> Result<Response, AppError> {
    let invitations = state.invitations().search_for_event(event_id, query).await?;
    Ok(success(invitations, "Invitations retrieved successfully"))
}

pub async fn validate_invitation(
    State(state): State<AppState>,
    Path((event_id, token)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let validated = state.invitations().validate(event_id, &token).await?;
    Ok(success(validated, "Invitation is valid"))
}

pub async fn accept_invitation(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ValidatedJson(req): ValidatedJson<AcceptInvitationRequest>,
) -> Result<Response, AppError> {
    let attendee = state.invitations().accept(&token, req).await?;
    Ok(created(attendee, "Invitation accepted successfully"))
}

pub async fn soft_delete_invitation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = state.invitations().soft_delete(id).await?;
    Ok(success(deleted, "Invitation deleted successfully"))
}

pub async fn hard_delete_invitation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.invitations().hard_delete(id).await?;
    Ok(empty_success("Invitation permanently deleted"))
}
