use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::models::payment::NewPayment;
use crate::models::{Payment, PaymentStatus};
use crate::store::{PaymentStore, StoreResult};

#[async_trait]
impl PaymentStore for PgStore {
    async fn insert_payment(&self, payment: NewPayment) -> StoreResult<Payment> {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments
                (id, user_id, name, email, phone, price_id, invitation_id, reference, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(payment.user_id)
        .bind(payment.name)
        .bind(payment.email)
        .bind(payment.phone)
        .bind(payment.price_id)
        .bind(payment.invitation_id)
        .bind(payment.reference)
        .bind(PaymentStatus::Pending)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_payment_by_reference(&self, reference: &str) -> StoreResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE reference = $1")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await
    }

    async fn transition_payment(
        &self,
        reference: &str,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> StoreResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET status = $3, updated_at = NOW()
            WHERE reference = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(reference)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
    }
}
