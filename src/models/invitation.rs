use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invitation {
    pub id: Uuid,
    pub event_id: Uuid,
    pub invitation_name: String,
    pub invitation_desc: Option<String>,
    pub event_name: String,
    pub invitee_name: Option<String>,
    pub invitee_email: Option<String>,
    pub invitee_phone: Option<String>,
    pub token: String,
    pub is_reusable: bool,
    /// `None` for reusable invitations, `false -> true` for single-use ones.
    pub accepted: Option<bool>,
    pub invite_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Invitation {
    pub fn is_consumed(&self) -> bool {
        !self.is_reusable && self.accepted == Some(true)
    }
}

#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub event_id: Uuid,
    pub invitation_name: String,
    pub invitation_desc: Option<String>,
    pub event_name: String,
    pub invitee_name: Option<String>,
    pub invitee_email: Option<String>,
    pub invitee_phone: Option<String>,
    pub token: String,
    pub is_reusable: bool,
    pub invite_link: String,
}

#[derive(Debug, Clone, Default)]
pub struct InvitationChanges {
    pub invitation_name: Option<String>,
    pub invitation_desc: Option<String>,
    pub event_name: Option<String>,
    pub invitee_name: Option<String>,
    pub invitee_email: Option<String>,
    pub invitee_phone: Option<String>,
}

/// Exact-match filter on invitee contact fields.
#[derive(Debug, Clone, Default)]
pub struct InvitationSearch {
    pub event_id: Option<Uuid>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedInvitation {
    pub invitation: Invitation,
    pub invite_link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidatedInvitation {
    pub invitation: Invitation,
    pub accept_link: String,
}
