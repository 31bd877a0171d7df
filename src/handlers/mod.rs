use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;

pub mod attendees;
pub mod chat;
pub mod events;
pub mod galleries;
pub mod invitations;
pub mod payments;
pub mod prices;
pub mod tokens;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "eventnest-api",
    };

    success(payload, "Health check successful")
}
