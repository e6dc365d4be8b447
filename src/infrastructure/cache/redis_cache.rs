//! Redis-backed cache implementation.
//!
//! # Storage Layout
//!
//! Each slug maps to one hash at `link_data:{slug}` with an explicit `kind`
//! discriminator, so positive and negative entries are told apart by a
//! field value rather than by probing the key's type:
//!
//! ```text
//! link_data:abc   kind=link  original_url=https://...  is_active=True  password=$2b$...
//! link_data:zzz   kind=NULL
//! ```
//!
//! `password` is the empty string for unprotected links.
//!
//! Older writers stored the negative marker as a plain string
//! (`SET link_data:zzz NULL`). Such keys are still read as negative entries
//! and are replaced by the hash layout on the next write.

use super::service::{CacheEntry, CacheError, CacheResult, CacheStore};
use crate::domain::entities::LinkSnapshot;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const KEY_PREFIX: &str = "link_data:";

const FIELD_KIND: &str = "kind";
const FIELD_URL: &str = "original_url";
const FIELD_ACTIVE: &str = "is_active";
const FIELD_PASSWORD: &str = "password";

const KIND_LINK: &str = "link";
const KIND_NEGATIVE: &str = "NULL";

/// Redis cache for link snapshots and negative markers.
///
/// Uses `ConnectionManager` for connection reuse and reconnects; each call
/// works on its own clone of the manager.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }

    fn build_key(slug: &str) -> String {
        format!("{}{}", KEY_PREFIX, slug)
    }

    /// Replaces the hash at `key` with `fields` and sets its TTL in one transaction.
    async fn replace_hash(
        &self,
        key: &str,
        fields: &[(&'static str, String)],
        ttl: Duration,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.client.clone();

        redis::pipe()
            .atomic()
            .del(key)
            .ignore()
            .hset_multiple(key, fields)
            .ignore()
            .expire(key, ttl_seconds(ttl))
            .ignore()
            .query_async::<()>(&mut conn)
            .await
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, slug: &str) -> CacheResult<CacheEntry> {
        let key = Self::build_key(slug);
        let mut conn = self.client.clone();

        let entry = match conn.hgetall::<_, HashMap<String, String>>(&key).await {
            Ok(fields) => decode_entry(slug, fields),
            // HGETALL on a string key fails with WRONGTYPE; GET succeeds only then.
            Err(hash_err) => match conn.get::<_, Option<String>>(&key).await {
                Ok(value) => decode_string_entry(slug, value),
                Err(_) => {
                    error!("Redis HGETALL error for {}: {}", slug, hash_err);
                    return Err(CacheError::OperationError(hash_err.to_string()));
                }
            },
        };
        match &entry {
            CacheEntry::Positive(_) => debug!("Cache HIT: {}", slug),
            CacheEntry::Negative => debug!("Cache HIT (negative): {}", slug),
            CacheEntry::Absent => debug!("Cache MISS: {}", slug),
        }

        Ok(entry)
    }

    async fn put_positive(
        &self,
        slug: &str,
        snapshot: &LinkSnapshot,
        ttl: Duration,
    ) -> CacheResult<()> {
        let key = Self::build_key(slug);

        self.replace_hash(&key, &encode_snapshot(snapshot), ttl)
            .await
            .map_err(|e| {
                warn!("Redis SET error for {}: {}", slug, e);
                CacheError::OperationError(e.to_string())
            })?;

        debug!(
            "Cache SET: {} -> {} (TTL: {}s)",
            slug,
            snapshot.original_url,
            ttl.as_secs()
        );
        Ok(())
    }

    async fn put_negative(&self, slug: &str, ttl: Duration) -> CacheResult<()> {
        let key = Self::build_key(slug);

        self.replace_hash(&key, &[(FIELD_KIND, KIND_NEGATIVE.to_string())], ttl)
            .await
            .map_err(|e| {
                warn!("Redis SET (negative) error for {}: {}", slug, e);
                CacheError::OperationError(e.to_string())
            })?;

        debug!("Cache SET negative: {} (TTL: {}s)", slug, ttl.as_secs());
        Ok(())
    }

    async fn evict(&self, slug: &str) -> CacheResult<()> {
        let key = Self::build_key(slug);
        let mut conn = self.client.clone();

        let deleted = conn.del::<_, i32>(&key).await.map_err(|e| {
            warn!("Redis DEL error for {}: {}", slug, e);
            CacheError::OperationError(e.to_string())
        })?;

        if deleted > 0 {
            debug!("Cache EVICT: {}", slug);
        }
        Ok(())
    }

    async fn ttl(&self, slug: &str) -> CacheResult<Option<Duration>> {
        let key = Self::build_key(slug);
        let mut conn = self.client.clone();

        let seconds = conn
            .ttl::<_, i64>(&key)
            .await
            .map_err(|e| CacheError::OperationError(e.to_string()))?;

        // -2: no such key, -1: key without expiry
        Ok(u64::try_from(seconds).ok().map(Duration::from_secs))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

fn ttl_seconds(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX).max(1)
}

fn encode_snapshot(snapshot: &LinkSnapshot) -> Vec<(&'static str, String)> {
    vec![
        (FIELD_KIND, KIND_LINK.to_string()),
        (FIELD_URL, snapshot.original_url.clone()),
        (FIELD_ACTIVE, encode_bool(snapshot.is_active).to_string()),
        (
            FIELD_PASSWORD,
            snapshot.password_hash.clone().unwrap_or_default(),
        ),
    ]
}

/// Decodes a hash read from Redis.
///
/// Anything that is neither a well-formed link nor a negative marker is
/// reported as [`CacheEntry::Absent`]; the caller will reload and overwrite it.
fn decode_entry(slug: &str, mut fields: HashMap<String, String>) -> CacheEntry {
    if fields.is_empty() {
        return CacheEntry::Absent;
    }

    let kind = fields.remove(FIELD_KIND);

    match kind.as_deref() {
        Some(KIND_NEGATIVE) => CacheEntry::Negative,
        Some(KIND_LINK) => {
            let Some(original_url) = fields.remove(FIELD_URL) else {
                warn!("Cached link for {} has no original_url, ignoring", slug);
                return CacheEntry::Absent;
            };
            let Some(is_active) = fields.get(FIELD_ACTIVE).and_then(|v| decode_bool(v)) else {
                warn!("Cached link for {} has no valid is_active, ignoring", slug);
                return CacheEntry::Absent;
            };
            let password_hash = fields.remove(FIELD_PASSWORD);

            CacheEntry::Positive(LinkSnapshot::new(original_url, is_active, password_hash))
        }
        other => {
            warn!("Unrecognised cache entry kind {:?} for {}, ignoring", other, slug);
            CacheEntry::Absent
        }
    }
}

/// Decodes a key holding a plain string instead of a hash.
fn decode_string_entry(slug: &str, value: Option<String>) -> CacheEntry {
    match value.as_deref() {
        Some(KIND_NEGATIVE) => CacheEntry::Negative,
        None => CacheEntry::Absent,
        Some(other) => {
            warn!("Unrecognised string cache entry {:?} for {}, ignoring", other, slug);
            CacheEntry::Absent
        }
    }
}

fn encode_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn decode_bool(value: &str) -> Option<bool> {
    match value {
        "True" | "true" | "1" => Some(true),
        "False" | "false" | "0" => Some(false),
        _ => None,
    }
}
