//! Caching layer for redirect lookups.
//!
//! Provides a [`CacheStore`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! Entries are tagged [`CacheEntry`] values: a link snapshot, a negative
//! marker for slugs confirmed absent, or nothing.

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheEntry, CacheError, CacheResult, CacheStore, NEGATIVE_TTL, POSITIVE_TTL};

#[cfg(test)]
pub use service::MockCacheStore;
