use axum::extract::State;
use axum::response::Response;

use crate::extractors::{Query, ValidatedJson};
use crate::state::AppState;
use crate::types::token_dtos::{GenerateTokensRequest, RedeemTokenRequest, TokenListQuery};
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

pub async fn generate_tokens(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<GenerateTokensRequest>,
) -> Result<Response, AppError> {
    let tokens = state.tokens().generate(req).await?;
    Ok(created(tokens, "Tokens generated successfully"))
}

pub async fn list_tokens(
    State(state): State<AppState>,
    Query(query): Query<TokenListQuery>,
) -> Result<Response, AppError> {
    let tokens = state.tokens().list(query.used).await?;
    Ok(success(tokens, "Tokens retrieved successfully"))
}

pub async fn redeem_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RedeemTokenRequest>,
) -> Result<Response, AppError> {
    let token = state.tokens().redeem(&req.code).await?;
    Ok(success(token, "Token redeemed successfully"))
}
