//! Bearer-token verification against the external identity service.
//!
//! The incoming token carries the caller's credentials. They are replayed
//! to `<AUTH_URL>/auth/signin-events`; the token the identity service hands
//! back describes the user for the rest of the request.

use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SignInClaims {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(default)]
    success: bool,
    token: Option<String>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, bearer: &str) -> Result<AuthUser, AppError>;
}

pub struct HttpIdentityVerifier {
    client: reqwest::Client,
    auth_url: String,
}

impl HttpIdentityVerifier {
    pub fn new(client: reqwest::Client, auth_url: impl Into<String>) -> Self {
        Self {
            client,
            auth_url: auth_url.into(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, bearer: &str) -> Result<AuthUser, AppError> {
        let claims: SignInClaims = decode_unverified(bearer)
            .map_err(|_| AppError::AuthError("Invalid authentication token".to_string()))?;

        let response = self
            .client
            .post(format!("{}/auth/signin-events", self.auth_url))
            .bearer_auth(bearer)
            .json(&claims)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Identity service unreachable: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Identity service rejected credentials");
            return Err(AppError::AuthError("Unauthorized".to_string()));
        }

        let body: SignInResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Malformed identity response: {e}"))
        })?;

        let token = match body {
            SignInResponse {
                success: true,
                token: Some(token),
            } => token,
            _ => {
                warn!("Identity service did not confirm the session");
                return Err(AppError::AuthError("Unauthorized".to_string()));
            }
        };

        decode_unverified(&token)
            .map_err(|_| AppError::AuthError("Invalid identity token".to_string()))
    }
}

/// Reads a JWT payload without checking its signature. The identity
/// service is the authority; this side only needs the claims.
pub fn decode_unverified<T: DeserializeOwned>(
    token: &str,
) -> Result<T, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<T>(token, &DecodingKey::from_secret(&[]), &validation).map(|data| data.claims)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("unexpected user id: {other}"))),
    }
}
