//! PostgreSQL-backed repositories.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::StoreResult;
use crate::models::Listing;

mod attendees;
mod chat;
mod events;
mod galleries;
mod invitations;
mod payments;
mod prices;
mod tokens;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn soft_delete(&self, table: &str, id: Uuid, at: DateTime<Utc>) -> StoreResult<bool> {
        let sql = format!("UPDATE {table} SET deleted_at = $2, updated_at = $2 WHERE id = $1");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn hard_delete(&self, table: &str, id: Uuid) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

fn listing_clause(listing: Listing) -> &'static str {
    match listing {
        Listing::Active => "deleted_at IS NULL",
        Listing::Deleted => "deleted_at IS NOT NULL",
    }
}

/// Wraps a user-supplied term for `ILIKE`, escaping its wildcards.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
