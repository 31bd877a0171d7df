use axum::extract::State;
use axum::response::Response;

use crate::clients::AuthUser;
use crate::extractors::ValidatedJson;
use crate::state::AppState;
use crate::types::payment_dtos::{InitializePaymentRequest, VerifyPaymentRequest};
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn initialize_payment(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<InitializePaymentRequest>,
) -> Result<Response, AppError> {
    let payment = state.payments().initialize(&user, req).await?;
    Ok(success(payment, "Payment initialized successfully"))
}

pub async fn verify_payment(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VerifyPaymentRequest>,
) -> Result<Response, AppError> {
    let verified = state.payments().verify(req.reference.trim()).await?;
    Ok(success(verified, "Payment verified successfully"))
}
