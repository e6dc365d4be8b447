//! Cache store trait, entry type and error types.

use crate::domain::entities::LinkSnapshot;
use async_trait::async_trait;
use std::time::Duration;

/// TTL for a cached link snapshot (7 days).
pub const POSITIVE_TTL: Duration = Duration::from_secs(604_800);

/// TTL for a "confirmed absent" marker.
pub const NEGATIVE_TTL: Duration = Duration::from_secs(60);

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// What the cache holds for one slug.
///
/// `Positive` and `Negative` are mutually exclusive: every write replaces
/// the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// The link was found at last check.
    Positive(LinkSnapshot),
    /// The link was confirmed absent at last check.
    Negative,
    /// Nothing cached (miss or expired).
    Absent,
}

/// Trait for caching link snapshots and negative markers per slug.
///
/// Errors are returned to the caller and never reported as a miss, so an
/// outage cannot lead to a negative entry being written.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads the entry for `slug`. Returns [`CacheEntry::Absent`] on a miss.
    async fn get(&self, slug: &str) -> CacheResult<CacheEntry>;

    /// Stores a snapshot, replacing any prior entry.
    ///
    /// All snapshot fields are written atomically.
    async fn put_positive(
        &self,
        slug: &str,
        snapshot: &LinkSnapshot,
        ttl: Duration,
    ) -> CacheResult<()>;

    /// Stores a negative marker, replacing any prior entry.
    async fn put_negative(&self, slug: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes whatever is cached for `slug`. Not an error if nothing is.
    async fn evict(&self, slug: &str) -> CacheResult<()>;

    /// Remaining TTL of the entry for `slug`, or `None` if there is none.
    async fn ttl(&self, slug: &str) -> CacheResult<Option<Duration>>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
