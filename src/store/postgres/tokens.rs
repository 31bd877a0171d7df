use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::PgStore;
use crate::models::AccessToken;
use crate::store::{StoreResult, TokenStore};

#[async_trait]
impl TokenStore for PgStore {
    async fn insert_tokens(
        &self,
        codes: Vec<String>,
        event_id: Option<Uuid>,
    ) -> StoreResult<Vec<AccessToken>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            QueryBuilder::<Postgres>::new("INSERT INTO access_tokens (id, code, event_id) ");
        query.push_values(codes, |mut row, code| {
            row.push_bind(Uuid::new_v4())
                .push_bind(code)
                .push_bind(event_id);
        });
        query.push(" RETURNING *");

        query
            .build_query_as::<AccessToken>()
            .fetch_all(&self.pool)
            .await
    }

    async fn list_tokens(&self, used: Option<bool>) -> StoreResult<Vec<AccessToken>> {
        sqlx::query_as::<_, AccessToken>(
            r#"
            SELECT * FROM access_tokens
            WHERE ($1::BOOLEAN IS NULL OR used = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(used)
        .fetch_all(&self.pool)
        .await
    }

    async fn find_token_by_code(&self, code: &str) -> StoreResult<Option<AccessToken>> {
        sqlx::query_as::<_, AccessToken>("SELECT * FROM access_tokens WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
    }

    async fn redeem_token(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<AccessToken>> {
        sqlx::query_as::<_, AccessToken>(
            r#"
            UPDATE access_tokens SET used = TRUE, used_at = $2, updated_at = $2
            WHERE code = $1 AND used = FALSE
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
    }
}
