use std::sync::Arc;

use chrono::Utc;
use rand::RngCore;
use tracing::info;
use uuid::Uuid;

use crate::models::attendee::NewAttendee;
use crate::models::event::SoftDeleted;
use crate::models::invitation::{
    CreatedInvitation, InvitationChanges, InvitationSearch, NewInvitation, ValidatedInvitation,
};
use crate::models::{Attendee, Invitation, Listing};
use crate::store::Store;
use crate::types::invitation_dtos::{
    AcceptInvitationRequest, ContactQuery, CreateInvitationRequest, UpdateInvitationRequest,
};
use crate::utils::error::AppError;
use crate::utils::slug::slugify;

use super::attendees::ensure_unregistered;
use super::{non_empty, present, require_event};

const TOKEN_BYTES: usize = 32;

pub struct InvitationService {
    store: Arc<dyn Store>,
    base_url: String,
}

impl InvitationService {
    pub fn new(store: Arc<dyn Store>, base_url: String) -> Self {
        Self { store, base_url }
    }

    pub async fn create(&self, req: CreateInvitationRequest) -> Result<CreatedInvitation, AppError> {
        require_event(self.store.as_ref(), req.event_id).await?;

        let token = generate_token();
        let invite_link = format!("{}/invitation/{}/{}", self.base_url, req.event_id, token);

        let invitation = self
            .store
            .insert_invitation(NewInvitation {
                event_id: req.event_id,
                invitation_name: req.invitation_name,
                invitation_desc: req.invitation_desc,
                event_name: slugify(&req.event_name),
                invitee_name: req.invitee_name,
                invitee_email: req.invitee_email,
                invitee_phone: req.invitee_phone,
                token,
                is_reusable: req.is_reusable,
                invite_link: invite_link.clone(),
            })
            .await?;
        info!(invitation_id = %invitation.id, reusable = invitation.is_reusable, "Invitation created");

        Ok(CreatedInvitation {
            invitation,
            invite_link,
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateInvitationRequest,
    ) -> Result<Invitation, AppError> {
        let mut changes: InvitationChanges = req.into();
        changes.event_name = changes.event_name.as_deref().map(slugify);

        self.store
            .update_invitation(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))
    }

    pub async fn get_one(&self, id: Uuid) -> Result<Invitation, AppError> {
        self.store
            .find_invitation(id)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))
    }

    pub async fn list(&self) -> Result<Vec<Invitation>, AppError> {
        non_empty(
            self.store.list_invitations(Listing::Active).await?,
            "No invitations found",
        )
    }

    pub async fn list_deleted(&self) -> Result<Vec<Invitation>, AppError> {
        non_empty(
            self.store.list_invitations(Listing::Deleted).await?,
            "No deleted invitations found",
        )
    }

    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Invitation>, AppError> {
        require_event(self.store.as_ref(), event_id).await?;
        non_empty(
            self.store.invitations_for_event(event_id).await?,
            "No invitations found for this event",
        )
    }

    pub async fn search(&self, query: ContactQuery) -> Result<Vec<Invitation>, AppError> {
        self.search_contacts(None, query).await
    }

    pub async fn search_for_event(
        &self,
        event_id: Uuid,
        query: ContactQuery,
    ) -> Result<Vec<Invitation>, AppError> {
        require_event(self.store.as_ref(), event_id).await?;
        self.search_contacts(Some(event_id), query).await
    }

    pub async fn validate(
        &self,
        event_id: Uuid,
        token: &str,
    ) -> Result<ValidatedInvitation, AppError> {
        let invitation = self
            .store
            .find_invitation_by_token(token)
            .await?
            .filter(|inv| inv.event_id == event_id && inv.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Invalid invitation link"))?;

        let accept_link = format!("{}/invitation/accept/{}", self.base_url, invitation.token);
        Ok(ValidatedInvitation {
            invitation,
            accept_link,
        })
    }

    /// Redeems an invitation token and registers the invitee as an attendee.
    ///
    /// Single-use invitations flip `accepted` with a conditional update, so
    /// only one of several concurrent accepts gets through.
    pub async fn accept(
        &self,
        token: &str,
        req: AcceptInvitationRequest,
    ) -> Result<Attendee, AppError> {
        let invitation = self
            .store
            .find_invitation_by_token(token)
            .await?
            .filter(|inv| inv.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Invalid invitation"))?;

        let attendee = NewAttendee {
            event_id: invitation.event_id,
            event_name: Some(invitation.event_name.clone()),
            name: req.invitee_name.or_else(|| invitation.invitee_name.clone()),
            email: req.invitee_email.or_else(|| invitation.invitee_email.clone()),
            phone: req.invitee_phone.or_else(|| invitation.invitee_phone.clone()),
            link: Some(invitation.invite_link.clone()),
            token: Some(invitation.token.clone()),
            ..Default::default()
        };
        ensure_unregistered(self.store.as_ref(), &attendee).await?;

        if !invitation.is_reusable
            && (invitation.is_consumed()
                || !self.store.mark_invitation_accepted(invitation.id).await?)
        {
            return Err(AppError::bad_request("Invitation has already been accepted"));
        }

        let created = self.store.insert_attendee(attendee).await?;
        info!(invitation_id = %invitation.id, attendee_id = %created.id, "Invitation accepted");
        Ok(created)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<SoftDeleted, AppError> {
        let deleted_at = Utc::now();
        if !self.store.soft_delete_invitation(id, deleted_at).await? {
            return Err(AppError::not_found("Invitation not found"));
        }
        Ok(SoftDeleted { id, deleted_at })
    }

    pub async fn hard_delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_invitation(id).await? {
            return Err(AppError::not_found("Invitation not found"));
        }
        Ok(())
    }

    async fn search_contacts(
        &self,
        event_id: Option<Uuid>,
        query: ContactQuery,
    ) -> Result<Vec<Invitation>, AppError> {
        let email = present(query.email.as_deref()).map(str::to_string);
        let phone = present(query.phone.as_deref()).map(str::to_string);
        if email.is_none() && phone.is_none() {
            return Err(AppError::bad_request(
                "Provide an email or phone number to search",
            ));
        }

        let filter = InvitationSearch {
            event_id,
            email,
            phone,
        };
        non_empty(
            self.store.search_invitations(&filter).await?,
            "No invitations found",
        )
    }
}

/// 32 random bytes, hex-encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
