//! Repository trait for short link lookups.

use crate::domain::entities::Link;
use async_trait::async_trait;

/// Errors raised by the durable link store.
///
/// These are infrastructure failures, never "link not found".
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("link store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the durable link store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if no link has this slug
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the store cannot be queried.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, RepositoryError>;

    /// Checks if the store is reachable. Used by the health endpoint only.
    async fn health_check(&self) -> bool;
}
