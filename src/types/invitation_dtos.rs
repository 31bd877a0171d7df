use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::invitation::InvitationChanges;

fn reusable_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    #[serde(alias = "eventId")]
    pub event_id: Uuid,
    #[validate(length(min = 1, message = "Invitation name is required"))]
    pub invitation_name: String,
    pub invitation_desc: Option<String>,
    #[validate(length(min = 1, message = "Event name is required"))]
    pub event_name: String,
    #[serde(alias = "event_invitee_name")]
    pub invitee_name: Option<String>,
    #[serde(alias = "event_invitee_email")]
    #[validate(email)]
    pub invitee_email: Option<String>,
    #[serde(alias = "event_invitee_phone")]
    pub invitee_phone: Option<String>,
    #[serde(alias = "isReusable", default = "reusable_by_default")]
    pub is_reusable: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateInvitationRequest {
    #[validate(length(min = 1))]
    pub invitation_name: Option<String>,
    pub invitation_desc: Option<String>,
    #[validate(length(min = 1))]
    pub event_name: Option<String>,
    #[serde(alias = "event_invitee_name")]
    pub invitee_name: Option<String>,
    #[serde(alias = "event_invitee_email")]
    #[validate(email)]
    pub invitee_email: Option<String>,
    #[serde(alias = "event_invitee_phone")]
    pub invitee_phone: Option<String>,
}

impl From<UpdateInvitationRequest> for InvitationChanges {
    fn from(req: UpdateInvitationRequest) -> Self {
        InvitationChanges {
            invitation_name: req.invitation_name,
            invitation_desc: req.invitation_desc,
            event_name: req.event_name,
            invitee_name: req.invitee_name,
            invitee_email: req.invitee_email,
            invitee_phone: req.invitee_phone,
        }
    }
}

/// Who is accepting; missing fields fall back to the invitation's invitee.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AcceptInvitationRequest {
    #[serde(alias = "event_invitee_name")]
    pub invitee_name: Option<String>,
    #[serde(alias = "event_invitee_email")]
    #[validate(email)]
    pub invitee_email: Option<String>,
    #[serde(alias = "event_invitee_phone")]
    pub invitee_phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    pub email: Option<String>,
    pub phone: Option<String>,
}
