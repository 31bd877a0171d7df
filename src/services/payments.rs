use std::sync::Arc;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::clients::payment::TransactionRequest;
use crate::clients::{AuthUser, PaymentGateway};
use crate::models::attendee::NewAttendee;
use crate::models::payment::NewPayment;
use crate::models::PaymentStatus;
use crate::store::Store;
use crate::types::payment_dtos::{InitializePaymentRequest, InitializedPayment, VerifiedPayment};
use crate::utils::error::AppError;

use super::attendees::ensure_unregistered;
use super::require_event;

const ALREADY_VERIFIED: &str = "Payment has already been verified";

pub struct PaymentService {
    store: Arc<dyn Store>,
    gateway: Arc<dyn PaymentGateway>,
    callback_url: String,
}

impl PaymentService {
    pub fn new(store: Arc<dyn Store>, gateway: Arc<dyn PaymentGateway>, callback_url: String) -> Self {
        Self {
            store,
            gateway,
            callback_url,
        }
    }

    pub async fn initialize(
        &self,
        user: &AuthUser,
        req: InitializePaymentRequest,
    ) -> Result<InitializedPayment, AppError> {
        let invitation = self
            .store
            .find_invitation(req.invitation_id)
            .await?
            .filter(|inv| inv.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;
        let event = require_event(self.store.as_ref(), invitation.event_id).await?;
        let price = self
            .store
            .find_price(req.price_id)
            .await?
            .filter(|price| price.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Price not found"))?;

        if price.event_id != event.id {
            return Err(AppError::bad_request("Price does not belong to this event"));
        }

        let request = TransactionRequest {
            email: user.email.clone(),
            amount: minor_units(price.amount)?,
            reference: format!("{}-{}", Utc::now().timestamp_millis(), user.id),
            callback_url: self.callback_url.clone(),
        };
        let transaction = self.gateway.initialize(&request).await?;

        let payment = self
            .store
            .insert_payment(NewPayment {
                user_id: user.id.clone(),
                name: user.fullname.clone(),
                email: Some(user.email.clone()),
                phone: user.phone.clone(),
                price_id: price.id,
                invitation_id: invitation.id,
                reference: request.reference,
            })
            .await?;
        info!(reference = %payment.reference, amount = request.amount, "Payment initialized");

        Ok(InitializedPayment {
            transaction,
            payment,
        })
    }

    /// Settles a payment against the gateway and, on success, registers the
    /// payer as an attendee. A reference never yields two attendees.
    pub async fn verify(&self, reference: &str) -> Result<VerifiedPayment, AppError> {
        let verified = self.gateway.verify(reference).await?;

        let payment = self
            .store
            .find_payment_by_reference(reference)
            .await?
            .ok_or_else(|| AppError::not_found("Payment not found"))?;
        let price = self
            .store
            .find_price(payment.price_id)
            .await?
            .ok_or_else(|| AppError::not_found("Price not found"))?;

        let expected = minor_units(price.amount)?;
        if verified.amount != expected {
            warn!(%reference, expected, received = verified.amount, "Payment amount mismatch");
            return Err(AppError::bad_request("Payment amount mismatch"));
        }
        if payment.status == PaymentStatus::Success {
            return Err(AppError::bad_request(ALREADY_VERIFIED));
        }

        if !verified.succeeded() {
            self.store
                .transition_payment(reference, PaymentStatus::Pending, PaymentStatus::Failed)
                .await?;
            warn!(%reference, status = %verified.status, "Payment not successful");
            return Err(AppError::bad_request("Payment verification failed"));
        }

        let invitation = self
            .store
            .find_invitation(payment.invitation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        let attendee = NewAttendee {
            event_id: invitation.event_id,
            event_name: Some(invitation.event_name),
            name: payment.name.clone(),
            email: payment.email.clone(),
            phone: payment.phone.clone(),
            price_category: Some(price.title),
            ticket: Some(payment.reference.clone()),
            link: Some(invitation.invite_link),
            token: Some(invitation.token),
            ..Default::default()
        };
        ensure_unregistered(self.store.as_ref(), &attendee).await?;

        let payment = self
            .store
            .transition_payment(reference, PaymentStatus::Pending, PaymentStatus::Success)
            .await?
            .ok_or_else(|| AppError::bad_request(ALREADY_VERIFIED))?;
        let attendee = self.store.insert_attendee(attendee).await?;
        info!(%reference, attendee_id = %attendee.id, "Payment verified");

        Ok(VerifiedPayment { payment, attendee })
    }
}

/// Converts a price to the gateway's minor currency units.
fn minor_units(amount: Decimal) -> Result<i64, AppError> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| AppError::InternalServerError(format!("Amount out of range: {amount}")))
}
