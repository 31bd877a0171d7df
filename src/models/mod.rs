pub mod attendee;
pub mod chat;
pub mod event;
pub mod gallery;
pub mod invitation;
pub mod payment;
pub mod price;
pub mod token;

pub use attendee::Attendee;
pub use chat::{ChatMessage, ChatRoom};
pub use event::Event;
pub use gallery::Gallery;
pub use invitation::Invitation;
pub use payment::{Payment, PaymentStatus};
pub use price::Price;
pub use token::AccessToken;

/// Which side of the soft-delete marker a listing reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Active,
    Deleted,
}
