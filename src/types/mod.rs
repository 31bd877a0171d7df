pub mod attendee_dtos;
pub mod chat_dtos;
pub mod event_dtos;
pub mod gallery_dtos;
pub mod invitation_dtos;
pub mod payment_dtos;
pub mod price_dtos;
pub mod token_dtos;

use rust_decimal::Decimal;
use validator::ValidationError;

pub(crate) fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}
