use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{listing_clause, PgStore};
use crate::models::invitation::{InvitationChanges, InvitationSearch, NewInvitation};
use crate::models::{Invitation, Listing};
use crate::store::{InvitationStore, StoreResult};

#[async_trait]
impl InvitationStore for PgStore {
    async fn insert_invitation(&self, invitation: NewInvitation) -> StoreResult<Invitation> {
        // Reusable invitations never track acceptance.
        let accepted = if invitation.is_reusable {
            None
        } else {
            Some(false)
        };

        sqlx::query_as::<_, Invitation>(
            r#"
            INSERT INTO invitations
                (id, event_id, invitation_name, invitation_desc, event_name,
                 invitee_name, invitee_email, invitee_phone, token, is_reusable,
                 accepted, invite_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(invitation.event_id)
        .bind(invitation.invitation_name)
        .bind(invitation.invitation_desc)
        .bind(invitation.event_name)
        .bind(invitation.invitee_name)
        .bind(invitation.invitee_email)
        .bind(invitation.invitee_phone)
        .bind(invitation.token)
        .bind(invitation.is_reusable)
        .bind(accepted)
        .bind(invitation.invite_link)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_invitation(&self, id: Uuid) -> StoreResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_invitation_by_token(&self, token: &str) -> StoreResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_invitation(
        &self,
        id: Uuid,
        changes: InvitationChanges,
    ) -> StoreResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            r#"
            UPDATE invitations SET
                invitation_name = COALESCE($2, invitation_name),
                invitation_desc = COALESCE($3, invitation_desc),
                event_name = COALESCE($4, event_name),
                invitee_name = COALESCE($5, invitee_name),
                invitee_email = COALESCE($6, invitee_email),
                invitee_phone = COALESCE($7, invitee_phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.invitation_name)
        .bind(changes.invitation_desc)
        .bind(changes.event_name)
        .bind(changes.invitee_name)
        .bind(changes.invitee_email)
        .bind(changes.invitee_phone)
        .fetch_optional(&self.pool)
        .await
    }

    async fn invitations_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE event_id = $1 AND deleted_at IS NULL ORDER BY created_at ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_invitations(&self, listing: Listing) -> StoreResult<Vec<Invitation>> {
        sqlx::query_as::<_, Invitation>(&format!(
            "SELECT * FROM invitations WHERE {} ORDER BY created_at ASC",
            listing_clause(listing)
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn search_invitations(&self, filter: &InvitationSearch) -> StoreResult<Vec<Invitation>> {
        let mut query =
            QueryBuilder::<Postgres>::new("SELECT * FROM invitations WHERE deleted_at IS NULL");

        if let Some(event_id) = filter.event_id {
            query.push(" AND event_id = ").push_bind(event_id);
        }
        if let Some(email) = &filter.email {
            query.push(" AND invitee_email = ").push_bind(email.clone());
        }
        if let Some(phone) = &filter.phone {
            query.push(" AND invitee_phone = ").push_bind(phone.clone());
        }
        query.push(" ORDER BY created_at ASC");

        query
            .build_query_as::<Invitation>()
            .fetch_all(&self.pool)
            .await
    }

    async fn mark_invitation_accepted(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE invitations SET accepted = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_reusable = FALSE AND accepted = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn soft_delete_invitation(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        self.soft_delete("invitations", id, at).await
    }

    async fn delete_invitation(&self, id: Uuid) -> StoreResult<bool> {
        self.hard_delete("invitations", id).await
    }
}
