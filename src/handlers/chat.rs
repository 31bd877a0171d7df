use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::extractors::{Path, Query, ValidatedJson};
use crate::state::AppState;
use crate::types::chat_dtos::{
    AddMemberRequest, CreateChatRoomRequest, KeywordQuery, SendMessageRequest,
    UpdateChatRoomRequest, UpdateMessageRequest,
};
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn create_room(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateChatRoomRequest>,
) -> Result<Response, AppError> {
    let room = state.chat().create_room(req).await?;
    Ok(created(room, "Chat room created successfully"))
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateChatRoomRequest>,
) -> Result<Response, AppError> {
    let room = state.chat().update_room(id, req).await?;
    Ok(success(room, "Chat room updated successfully"))
}

pub async fn room_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let room = state.chat().get_room_by_event(event_id).await?;
    Ok(success(room, "Chat room retrieved successfully"))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let room = state.chat().get_room(id).await?;
    Ok(success(room, "Chat room retrieved successfully"))
}

pub async fn list_rooms(State(state): State<AppState>) -> Result<Response, AppError> {
    let rooms = state.chat().list_rooms().await?;
    Ok(success(rooms, "Chat rooms retrieved successfully"))
}

pub async fn list_deleted_rooms(State(state): State<AppState>) -> Result<Response, AppError> {
    let rooms = state.chat().list_deleted_rooms().await?;
    Ok(success(rooms, "Deleted chat rooms retrieved successfully"))
}

pub async fn soft_delete_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = state.chat().soft_delete_room(id).await?;
    Ok(success(deleted, "Chat room deleted successfully"))
}

pub async fn hard_delete_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.chat().hard_delete_room(id).await?;
    Ok(empty_success("Chat room permanently deleted"))
}

pub async fn add_member(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AddMemberRequest>,
) -> Result<Response, AppError> {
    let members = state.chat().add_member(room_id, req.attendee_id).await?;
    Ok(success(members, "Member added successfully"))
}

pub async fn list_members(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let members = state.chat().members(room_id).await?;
    Ok(success(members, "Members retrieved successfully"))
}

pub async fn send_message(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<Response, AppError> {
    let message = state
        .chat()
        .send_message(room_id, req.attendee_id, &req.message)
        .await?;
    Ok(created(message, "Message sent successfully"))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let messages = state.chat().messages(room_id).await?;
    Ok(success(messages, "Messages retrieved successfully"))
}

pub async fn search_messages(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<KeywordQuery>,
) -> Result<Response, AppError> {
    let messages = state
        .chat()
        .search_messages(room_id, query.keyword.as_deref())
        .await?;
    Ok(success(messages, "Messages retrieved successfully"))
}

pub async fn update_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateMessageRequest>,
) -> Result<Response, AppError> {
    let message = state.chat().edit_message(id, &req.message).await?;
    Ok(success(message, "Message updated successfully"))
}

pub async fn soft_delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let deleted = state.chat().soft_delete_message(id).await?;
    Ok(success(deleted, "Message deleted successfully"))
}

pub async fn hard_delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.chat().hard_delete_message(id).await?;
    Ok(empty_success("Message permanently deleted"))
}
