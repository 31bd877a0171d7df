//! Fakes and fixtures shared by unit and router tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::payment::{InitializedTransaction, TransactionRequest, VerifiedTransaction};
use crate::clients::{AuthUser, Email, IdentityVerifier, Mailer, PaymentGateway};
use crate::config::Config;
use crate::models::event::EventWithChildren;
use crate::realtime::ChatHub;
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use crate::types::event_dtos::CreateEventRequest;
use crate::utils::error::AppError;

pub const VALID_BEARER: &str = "valid-token";

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Answers `verify` with whatever outcome the test configured.
pub struct StubGateway {
    outcome: Mutex<(String, i64)>,
    initialized: Mutex<Vec<TransactionRequest>>,
}

impl StubGateway {
    pub fn settle(&self, status: &str, amount: i64) {
        *self.outcome.lock().unwrap() = (status.to_string(), amount);
    }

    pub fn initialized(&self) -> Vec<TransactionRequest> {
        self.initialized.lock().unwrap().clone()
    }
}

impl Default for StubGateway {
    fn default() -> Self {
        Self {
            outcome: Mutex::new(("success".to_string(), 0)),
            initialized: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn initialize(
        &self,
        request: &TransactionRequest,
    ) -> Result<InitializedTransaction, AppError> {
        self.initialized.lock().unwrap().push(request.clone());
        Ok(InitializedTransaction {
            authorization_url: format!("https://checkout.test/{}", request.reference),
            access_code: "access-code".to_string(),
            reference: request.reference.clone(),
        })
    }

    async fn verify(&self, reference: &str) -> Result<VerifiedTransaction, AppError> {
        let (status, amount) = self.outcome.lock().unwrap().clone();
        Ok(VerifiedTransaction {
            status,
            amount,
            reference: reference.to_string(),
        })
    }
}

/// Accepts exactly [`VALID_BEARER`].
pub struct StubIdentity;

#[async_trait]
impl IdentityVerifier for StubIdentity {
    async fn verify(&self, bearer: &str) -> Result<AuthUser, AppError> {
        if bearer == VALID_BEARER {
            Ok(user())
        } else {
            Err(AppError::AuthError("Invalid token".to_string()))
        }
    }
}

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub gateway: Arc<StubGateway>,
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/eventnest_test".to_string(),
        port: 0,
        db_max_connections: 1,
        auth_url: "http://auth.test".to_string(),
        paystack_secret_key: "sk_test".to_string(),
        paystack_base_url: "http://paystack.test".to_string(),
        frontend_url: "http://app.test".to_string(),
        invite_base_url: "http://invite.test".to_string(),
        smtp: None,
        mail_from: "EventNest <no-reply@eventnest.test>".to_string(),
        operator_email: "ops@eventnest.test".to_string(),
        http_timeout: Duration::from_secs(5),
        cors_allowed_origins: vec!["http://app.test".to_string()],
        production: false,
    }
}

pub fn context() -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let mailer = Arc::new(RecordingMailer::default());
    let gateway = Arc::new(StubGateway::default());

    let state = AppState {
        store: store.clone(),
        mailer: mailer.clone(),
        gateway: gateway.clone(),
        identity: Arc::new(StubIdentity),
        chat_hub: ChatHub::new(),
        config: Arc::new(test_config()),
    };

    TestContext {
        state,
        store,
        mailer,
        gateway,
    }
}

pub fn user() -> AuthUser {
    AuthUser {
        id: "42".to_string(),
        email: "ada@example.com".to_string(),
        fullname: Some("Ada Lovelace".to_string()),
        phone: Some("+2348000000000".to_string()),
    }
}

pub fn create_event_request(title: &str) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        description: None,
        location: "Eko Hotel".to_string(),
        town: "Lagos".to_string(),
        image: None,
        start_date: "2099-12-31".to_string(),
        end_date: None,
        prices: Vec::new(),
        galleries: Vec::new(),
    }
}

pub async fn seed_event(state: &AppState, title: &str) -> EventWithChildren {
    state
        .events()
        .create(&user(), create_event_request(title))
        .await
        .unwrap()
}
