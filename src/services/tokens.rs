use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::info;

use crate::models::AccessToken;
use crate::store::Store;
use crate::types::token_dtos::{GenerateTokensRequest, MAX_TOKENS_PER_BATCH};
use crate::utils::error::AppError;

use super::require_event;

const CODE_LENGTH: usize = 10;

pub struct TokenService {
    store: Arc<dyn Store>,
}

impl TokenService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn generate(&self, req: GenerateTokensRequest) -> Result<Vec<AccessToken>, AppError> {
        if !(1..=MAX_TOKENS_PER_BATCH).contains(&req.count) {
            return Err(AppError::bad_request(format!(
                "Count must be between 1 and {MAX_TOKENS_PER_BATCH}"
            )));
        }
        if let Some(event_id) = req.event_id {
            require_event(self.store.as_ref(), event_id).await?;
        }

        let tokens = self
            .store
            .insert_tokens(fresh_codes(req.count as usize), req.event_id)
            .await?;
        info!(count = tokens.len(), "Access tokens generated");
        Ok(tokens)
    }

    pub async fn list(&self, used: Option<bool>) -> Result<Vec<AccessToken>, AppError> {
        Ok(self.store.list_tokens(used).await?)
    }

    /// Consumes a token. Only the first redemption succeeds.
    pub async fn redeem(&self, code: &str) -> Result<AccessToken, AppError> {
        let code = code.trim().to_uppercase();
        let token = self
            .store
            .find_token_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found("Token not found"))?;
        if token.used {
            return Err(AppError::bad_request("Token has already been used"));
        }

        self.store
            .redeem_token(&code, Utc::now())
            .await?
            .ok_or_else(|| AppError::bad_request("Token has already been used"))
    }
}

/// Distinct upper-case alphanumeric codes.
fn fresh_codes(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let mut codes = HashSet::with_capacity(count);
    while codes.len() < count {
        let code: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        codes.insert(code);
    }
    codes.into_iter().collect()
}
