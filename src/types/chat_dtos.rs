use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChatRoomRequest {
    #[serde(alias = "eventId")]
    pub event_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateChatRoomRequest {
    #[validate(length(min = 1, message = "Event name is required"))]
    pub event_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[serde(alias = "attendeeId")]
    pub attendee_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[serde(alias = "attendeeId")]
    pub attendee_id: Uuid,
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    pub keyword: Option<String>,
}
