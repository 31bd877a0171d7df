use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::clients::payment::InitializedTransaction;
use crate::models::{Attendee, Payment};

#[derive(Debug, Deserialize, Validate)]
pub struct InitializePaymentRequest {
    #[serde(alias = "priceId")]
    pub price_id: Uuid,
    #[serde(alias = "invitationId")]
    pub invitation_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "Reference is required"))]
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct InitializedPayment {
    #[serde(flatten)]
    pub transaction: InitializedTransaction,
    pub payment: Payment,
}

#[derive(Debug, Serialize)]
pub struct VerifiedPayment {
    pub payment: Payment,
    pub attendee: Attendee,
}
