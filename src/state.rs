use std::sync::Arc;

use crate::clients::{IdentityVerifier, Mailer, PaymentGateway};
use crate::config::Config;
use crate::realtime::ChatHub;
use crate::services::{
    AttendeeService, ChatService, EventService, GalleryService, InvitationService,
    PaymentService, PriceService, TokenService,
};
use crate::store::Store;

/// Shared handles cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub mailer: Arc<dyn Mailer>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub chat_hub: ChatHub,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn events(&self) -> EventService {
        EventService::new(
            self.store.clone(),
            self.mailer.clone(),
            self.config.operator_email.clone(),
        )
    }

    pub fn prices(&self) -> PriceService {
        PriceService::new(self.store.clone())
    }

    pub fn galleries(&self) -> GalleryService {
        GalleryService::new(self.store.clone())
    }

    pub fn attendees(&self) -> AttendeeService {
        AttendeeService::new(self.store.clone(), self.mailer.clone())
    }

    pub fn invitations(&self) -> InvitationService {
        InvitationService::new(self.store.clone(), self.config.invite_base_url.clone())
    }

    pub fn chat(&self) -> ChatService {
        ChatService::new(self.store.clone())
    }

    pub fn payments(&self) -> PaymentService {
        PaymentService::new(
            self.store.clone(),
            self.gateway.clone(),
            format!("{}/payment/callback", self.config.frontend_url),
        )
    }

    pub fn tokens(&self) -> TokenService {
        TokenService::new(self.store.clone())
    }
}
