//! PostgreSQL implementation of the link registry.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Insertion, NewShortLink, ShortLink};
use crate::domain::repositories::LinkRegistry;
use crate::error::AppError;

/// PostgreSQL registry backed by the `url_map` table.
///
/// The `url_map_short_key` unique constraint is the mutual-exclusion
/// mechanism: inserts use `ON CONFLICT (short) DO NOTHING`, so two writers
/// racing for one code (in this process or any other) get exactly one winner.
pub struct PgLinkRegistry {
    pool: Arc<PgPool>,
}

impl PgLinkRegistry {
    /// Creates a new registry with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRegistry for PgLinkRegistry {
    async fn exists(&self, short: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM url_map WHERE short = $1)",
        )
        .bind(short)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn insert_if_absent(&self, new_link: NewShortLink) -> Result<Insertion, AppError> {
        let row = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO url_map (original, short)
            VALUES ($1, $2)
            ON CONFLICT (short) DO NOTHING
            RETURNING id, original, short, created_at
            "#,
        )
        .bind(&new_link.original)
        .bind(&new_link.short)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match row {
            Some(link) => Insertion::Inserted(link),
            None => Insertion::Taken,
        })
    }

    async fn get(&self, short: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, original, short, created_at
            FROM url_map
            WHERE short = $1
            "#,
        )
        .bind(short)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_map")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
