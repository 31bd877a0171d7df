//! Hosted payment gateway (Paystack transaction API).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::utils::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRequest {
    pub email: String,
    /// Minor currency units.
    pub amount: i64,
    pub reference: String,
    pub callback_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitializedTransaction {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifiedTransaction {
    pub status: String,
    /// Minor currency units.
    pub amount: i64,
    pub reference: String,
}

impl VerifiedTransaction {
    pub fn succeeded(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Deserialize)]
struct GatewayEnvelope<T> {
    status: bool,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initialize(
        &self,
        request: &TransactionRequest,
    ) -> Result<InitializedTransaction, AppError>;
    async fn verify(&self, reference: &str) -> Result<VerifiedTransaction, AppError>;
}

pub struct PaystackGateway {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl PaystackGateway {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        let envelope: GatewayEnvelope<T> = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Malformed payment gateway response: {e}"))
        })?;

        match envelope {
            GatewayEnvelope {
                status: true,
                data: Some(data),
                ..
            } if status.is_success() => Ok(data),
            GatewayEnvelope { message, .. } => {
                warn!(%status, %message, "Payment gateway rejected the request");
                Err(AppError::ExternalServiceError(format!(
                    "Payment gateway error: {message}"
                )))
            }
        }
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize(
        &self,
        request: &TransactionRequest,
    ) -> Result<InitializedTransaction, AppError> {
        let response = self
            .client
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Payment gateway unreachable: {e}"))
            })?;

        Self::unwrap_envelope(response).await
    }

    async fn verify(&self, reference: &str) -> Result<VerifiedTransaction, AppError> {
        let response = self
            .client
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Payment gateway unreachable: {e}"))
            })?;

        Self::unwrap_envelope(response).await
    }
}
