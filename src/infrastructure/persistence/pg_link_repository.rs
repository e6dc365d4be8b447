//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkRepository, RepositoryError};

/// PostgreSQL repository for link lookups.
///
/// Holds a shared pool; each query checks a connection out and returns it
/// when the query future completes or is dropped.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    slug: String,
    original_url: String,
    original_url_hash: String,
    password_hash: Option<String>,
    is_active: bool,
    owner_id: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    click_count: i64,
    notes: Option<String>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            original_url: row.original_url,
            original_url_hash: row.original_url_hash,
            password_hash: row.password_hash,
            is_active: row.is_active,
            owner_id: row.owner_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
            click_count: row.click_count,
            notes: row.notes,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, RepositoryError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, slug, original_url, original_url_hash, password_hash, is_active,
                   owner_id, created_at, expires_at, click_count, notes
            FROM links
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
