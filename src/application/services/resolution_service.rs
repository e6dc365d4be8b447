//! Slug resolution: cache-aside lookup, negative caching, password gate and
//! click emission.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::entities::LinkSnapshot;
use crate::domain::repositories::LinkRepository;
use crate::domain::resolution::ResolutionOutcome;
use crate::error::ResolveError;
use crate::infrastructure::cache::{CacheEntry, CacheStore, NEGATIVE_TTL, POSITIVE_TTL};
use crate::infrastructure::messaging::ClickPublisher;
use crate::infrastructure::security::PasswordVerifier;

/// Tunables for [`ResolutionService`].
#[derive(Debug, Clone, Copy)]
pub struct ResolutionSettings {
    /// TTL of cached link snapshots.
    pub positive_ttl: Duration,
    /// TTL of "not found" markers.
    pub negative_ttl: Duration,
    /// Upper bound on each cache or repository call.
    pub io_timeout: Duration,
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            positive_ttl: POSITIVE_TTL,
            negative_ttl: NEGATIVE_TTL,
            io_timeout: Duration::from_secs(2),
        }
    }
}

/// Resolves slugs to redirect decisions.
///
/// Stateless: all state lives in the cache and the repository, so one
/// instance is shared by every request.
///
/// # Resolution Flow
///
/// 1. Read the cache entry for the slug
/// 2. Negative entry: `NotFound` without touching the repository
/// 3. Miss: load from the repository and write back a positive entry, or a
///    negative one if the slug does not exist
/// 4. Check the snapshot: inactive, then password
/// 5. On a granted redirect, publish one click event
///
/// Each cache and repository step is bounded by `io_timeout`. A failure or
/// timeout aborts the call with [`ResolveError`] and caches nothing.
pub struct ResolutionService {
    link_repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheStore>,
    publisher: Arc<dyn ClickPublisher>,
    verifier: Arc<dyn PasswordVerifier>,
    settings: ResolutionSettings,
}

impl ResolutionService {
    /// Creates a new resolution service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheStore>,
        publisher: Arc<dyn ClickPublisher>,
        verifier: Arc<dyn PasswordVerifier>,
        settings: ResolutionSettings,
    ) -> Self {
        Self {
            link_repository,
            cache,
            publisher,
            verifier,
            settings,
        }
    }

    /// Resolves `slug`, checking `password` if the link is protected.
    ///
    /// An empty password is treated as no password.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the cache or repository fails or times out.
    /// Click publishing never produces an error.
    pub async fn resolve(
        &self,
        slug: &str,
        password: Option<&str>,
    ) -> Result<ResolutionOutcome, ResolveError> {
        let snapshot = match self.bounded("cache read", self.cache.get(slug)).await? {
            CacheEntry::Positive(snapshot) => {
                debug!("Cache hit for {}", slug);
                snapshot
            }
            CacheEntry::Negative => {
                debug!("Cache hit for {} (negative marker)", slug);
                return Ok(ResolutionOutcome::NotFound);
            }
            CacheEntry::Absent => match self.load_and_cache(slug).await? {
                Some(snapshot) => snapshot,
                None => return Ok(ResolutionOutcome::NotFound),
            },
        };

        let outcome = self.authorize(snapshot, password).await?;

        if outcome.is_redirect() {
            self.publisher.publish_click(slug).await;
        }

        debug!("Resolved {} -> {}", slug, outcome.label());
        Ok(outcome)
    }

    /// Loads the link from the repository and writes the result back to the cache.
    async fn load_and_cache(&self, slug: &str) -> Result<Option<LinkSnapshot>, ResolveError> {
        let link = self
            .bounded("repository lookup", self.link_repository.find_by_slug(slug))
            .await?;

        let Some(link) = link else {
            self.bounded(
                "cache write",
                self.cache.put_negative(slug, self.settings.negative_ttl),
            )
            .await?;
            debug!("Cache miss for {}, not in repository; cached negative marker", slug);
            return Ok(None);
        };

        let snapshot = LinkSnapshot::from(&link);
        self.bounded(
            "cache write",
            self.cache
                .put_positive(slug, &snapshot, self.settings.positive_ttl),
        )
        .await?;
        debug!("Cache miss for {}, fetched from repository and cached", slug);

        Ok(Some(snapshot))
    }

    /// Applies the activity and password checks to a snapshot from either source.
    async fn authorize(
        &self,
        snapshot: LinkSnapshot,
        password: Option<&str>,
    ) -> Result<ResolutionOutcome, ResolveError> {
        if !snapshot.is_active {
            return Ok(ResolutionOutcome::Inactive);
        }

        if let Some(hash) = snapshot.password_hash.filter(|h| !h.is_empty()) {
            let Some(plaintext) = password.filter(|p| !p.is_empty()) else {
                return Ok(ResolutionOutcome::Unauthorized);
            };

            if !self.verify(plaintext.to_owned(), hash).await? {
                return Ok(ResolutionOutcome::Unauthorized);
            }
        }

        Ok(ResolutionOutcome::Redirect(snapshot.original_url))
    }

    /// Runs password verification on the blocking pool.
    async fn verify(&self, plaintext: String, hash: String) -> Result<bool, ResolveError> {
        let verifier = Arc::clone(&self.verifier);

        tokio::task::spawn_blocking(move || verifier.verify(&plaintext, &hash))
            .await
            .map_err(|e| ResolveError::Verifier(e.to_string()))
    }

    async fn bounded<T, E>(
        &self,
        stage: &'static str,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, ResolveError>
    where
        ResolveError: From<E>,
    {
        match tokio::time::timeout(self.settings.io_timeout, fut).await {
            Ok(result) => result.map_err(ResolveError::from),
            Err(_) => Err(ResolveError::Timeout(stage)),
        }
    }
}
