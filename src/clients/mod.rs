//! Collaborators reached over the network.

pub mod identity;
pub mod mail;
pub mod payment;

pub use identity::{AuthUser, HttpIdentityVerifier, IdentityVerifier};
pub use mail::{ConsoleMailer, Email, Mailer, SmtpMailer};
pub use payment::{PaymentGateway, PaystackGateway};

use std::time::Duration;

use crate::utils::error::AppError;

/// Shared outbound client; every collaborator reuses its connection pool.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::InternalServerError(format!("Failed to build HTTP client: {e}")))
}
