use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

pub const MAX_TOKENS_PER_BATCH: u32 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateTokensRequest {
    #[validate(range(min = 1, max = 500, message = "Count must be between 1 and 500"))]
    pub count: u32,
    #[serde(alias = "eventId")]
    pub event_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RedeemTokenRequest {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenListQuery {
    pub used: Option<bool>,
}
