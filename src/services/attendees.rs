use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::clients::{Email, Mailer};
use crate::models::attendee::{AttendeeChanges, NewAttendee};
use crate::models::event::SoftDeleted;
use crate::models::{Attendee, Listing};
use crate::store::Store;
use crate::types::attendee_dtos::{CreateAttendeeRequest, UpdateAttendeeRequest};
use crate::utils::error::AppError;

use super::{non_empty, present, require_event};

pub struct AttendeeService {
    store: Arc<dyn Store>,
    mailer: Arc<dyn Mailer>,
}

impl AttendeeService {
    pub fn new(store: Arc<dyn Store>, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    pub async fn create(&self, req: CreateAttendeeRequest) -> Result<Attendee, AppError> {
        require_event(self.store.as_ref(), req.event_id).await?;
        let attendee: NewAttendee = req.into();
        ensure_unregistered(self.store.as_ref(), &attendee).await?;

        let created = self.store.insert_attendee(attendee).await?;
        info!(attendee_id = %created.id, event_id = %created.event_id, "Attendee registered");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, req: UpdateAttendeeRequest) -> Result<Attendee, AppError> {
        self.store
            .update_attendee(id, req.into())
            .await?
            .ok_or_else(|| AppError::not_found("Attendee not found"))
    }

    pub async fn get_one(&self, id: Uuid) -> Result<Attendee, AppError> {
        self.store
            .find_attendee(id)
            .await?
            .ok_or_else(|| AppError::not_found("Attendee not found"))
    }

    pub async fn list(&self) -> Result<Vec<Attendee>, AppError> {
        non_empty(
            self.store.list_attendees(Listing::Active).await?,
            "No attendees found",
        )
    }

    pub async fn list_deleted(&self) -> Result<Vec<Attendee>, AppError> {
        non_empty(
            self.store.list_attendees(Listing::Deleted).await?,
            "No deleted attendees found",
        )
    }

    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Attendee>, AppError> {
        require_event(self.store.as_ref(), event_id).await?;
        non_empty(
            self.store.attendees_for_event(event_id).await?,
            "No attendees found for this event",
        )
    }

    /// Marks the attendee as present. Checking in twice is not an error.
    pub async fn check_in(&self, id: Uuid) -> Result<Attendee, AppError> {
        self.store
            .update_attendee(
                id,
                AttendeeChanges {
                    checked_in: Some(true),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Attendee not found"))
    }

    pub async fn send_thank_you(&self, id: Uuid) -> Result<Attendee, AppError> {
        let attendee = self.get_one(id).await?;
        let email = present(attendee.email.as_deref())
            .ok_or_else(|| AppError::bad_request("Attendee has no email address"))?
            .to_string();

        let event_name = match present(attendee.event_name.as_deref()) {
            Some(name) => name.to_string(),
            None => self
                .store
                .find_event(attendee.event_id)
                .await?
                .map(|event| event.title)
                .unwrap_or_else(|| "our event".to_string()),
        };
        let name = attendee.name.as_deref().unwrap_or("there");

        self.mailer
            .send(Email::new(
                email,
                format!("Thank You for Attending {event_name}"),
                format!(
                    "Hi {name},\n\nThank you for attending {event_name}. We hope you had a great time and look forward to seeing you again."
                ),
            ))
            .await?;

        self.store
            .update_attendee(
                id,
                AttendeeChanges {
                    thank_you_sent: Some(true),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Attendee not found"))
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<SoftDeleted, AppError> {
        let deleted_at = Utc::now();
        if !self.store.soft_delete_attendee(id, deleted_at).await? {
            return Err(AppError::not_found("Attendee not found"));
        }
        Ok(SoftDeleted { id, deleted_at })
    }

    pub async fn hard_delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_attendee(id).await? {
            return Err(AppError::not_found("Attendee not found"));
        }
        Ok(())
    }
}

/// Rejects a second registration of the same email or phone for one event.
pub(crate) async fn ensure_unregistered(
    store: &dyn Store,
    attendee: &NewAttendee,
) -> Result<(), AppError> {
    if let Some(email) = present(attendee.email.as_deref()) {
        if store
            .find_attendee_by_email(attendee.event_id, email)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request(
                "An attendee with this email already exists for this event",
            ));
        }
    }
    if let Some(phone) = present(attendee.phone.as_deref()) {
        if store
            .find_attendee_by_phone(attendee.event_id, phone)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request(
                "An attendee with this phone number already exists for this event",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, seed_event};

    fn request(event_id: Uuid, email: &str) -> CreateAttendeeRequest {
        CreateAttendeeRequest {
            event_id,
            event_name: Some("Launch Party".to_string()),
            name: "Grace Hopper".to_string(),
            email: Some(email.to_string()),
            phone: None,
            image: None,
            price_category: Some("VIP".to_string()),
            ticket: None,
            link: None,
            token: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_for_same_event_is_rejected() {
        let ctx = context();
        let event = seed_event(&ctx.state, "Launch Party").await;
        let attendees = ctx.state.attendees();

        attendees
            .create(request(event.event.id, "grace@example.com"))
            .await
            .unwrap();
        let err = attendees
            .create(request(event.event.id, "grace@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let other = seed_event(&ctx.state, "Afterparty").await;
        attendees
            .create(request(other.event.id, "grace@example.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_in_is_idempotent() {
        let ctx = context();
        let event = seed_event(&ctx.state, "Launch Party").await;
        let attendees = ctx.state.attendees();
        let created = attendees
            .create(request(event.event.id, "grace@example.com"))
            .await
            .unwrap();
        assert!(!created.checked_in);

        let first = attendees.check_in(created.id).await.unwrap();
        let second = attendees.check_in(created.id).await.unwrap();
        assert!(first.checked_in);
        assert!(second.checked_in);
    }

    #[tokio::test]
    async fn test_thank_you_mail_is_sent_and_recorded() {
        let ctx = context();
        let event = seed_event(&ctx.state, "Launch Party").await;
        let attendees = ctx.state.attendees();
        let created = attendees
            .create(request(event.event.id, "grace@example.com"))
            .await
            .unwrap();

        let updated = attendees.send_thank_you(created.id).await.unwrap();

        assert!(updated.thank_you_sent);
        let sent = ctx.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "grace@example.com");
        assert_eq!(sent[0].subject, "Thank You for Attending Launch Party");
    }

    #[tokio::test]
    async fn test_thank_you_requires_email() {
        let ctx = context();
        let event = seed_event(&ctx.state, "Launch Party").await;
        let mut req = request(event.event.id, "unused@example.com");
        req.email = None;
        let created = ctx.state.attendees().create(req).await.unwrap();

        let err = ctx.state.attendees().send_thank_you(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(ctx.mailer.sent().is_empty());
    }
}
