//! No-op cache implementation for disabled caching.

use super::service::{CacheEntry, CacheResult, CacheStore};
use crate::domain::entities::LinkSnapshot;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache that never stores anything.
///
/// Used when Redis is not configured. Every read is a miss, so the resolution
/// service falls through to the repository on each request.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullCache {
    async fn get(&self, _slug: &str) -> CacheResult<CacheEntry> {
        Ok(CacheEntry::Absent)
    }

    async fn put_positive(
        &self,
        _slug: &str,
        _snapshot: &LinkSnapshot,
        _ttl: Duration,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn put_negative(&self, _slug: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn evict(&self, _slug: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn ttl(&self, _slug: &str) -> CacheResult<Option<Duration>> {
        Ok(None)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
