#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use link_redirector::application::services::{ResolutionService, ResolutionSettings};
use link_redirector::domain::click_event::ClickEvent;
use link_redirector::domain::entities::{Link, LinkSnapshot};
use link_redirector::domain::repositories::{LinkRepository, RepositoryError};
use link_redirector::infrastructure::cache::{CacheEntry, CacheResult, CacheStore};
use link_redirector::infrastructure::messaging::QueuedClickPublisher;
use link_redirector::infrastructure::security::BcryptVerifier;
use link_redirector::state::AppState;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

pub const PASSWORD: &str = "s3cret";

/// Repository double backed by a map, counting lookups.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    lookups: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryLinkRepository {
    pub fn insert(&self, link: Link) {
        self.links.lock().unwrap().insert(link.slug.clone(), link);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail as if the database were down.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("connection refused".to_string()));
        }

        Ok(self.links.lock().unwrap().get(slug).cloned())
    }

    async fn health_check(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}

/// Cache double that records entries together with the TTL they were written with.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (CacheEntry, Duration)>>,
}

impl MemoryCache {
    pub fn entry(&self, slug: &str) -> Option<(CacheEntry, Duration)> {
        self.entries.lock().unwrap().get(slug).cloned()
    }

    pub fn seed(&self, slug: &str, snapshot: LinkSnapshot) {
        self.entries.lock().unwrap().insert(
            slug.to_string(),
            (CacheEntry::Positive(snapshot), Duration::from_secs(604_800)),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, slug: &str) -> CacheResult<CacheEntry> {
        Ok(self
            .entry(slug)
            .map(|(entry, _)| entry)
            .unwrap_or(CacheEntry::Absent))
    }

    async fn put_positive(
        &self,
        slug: &str,
        snapshot: &LinkSnapshot,
        ttl: Duration,
    ) -> CacheResult<()> {
        self.entries.lock().unwrap().insert(
            slug.to_string(),
            (CacheEntry::Positive(snapshot.clone()), ttl),
        );
        Ok(())
    }

    async fn put_negative(&self, slug: &str, ttl: Duration) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(slug.to_string(), (CacheEntry::Negative, ttl));
        Ok(())
    }

    async fn evict(&self, slug: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(slug);
        Ok(())
    }

    async fn ttl(&self, slug: &str) -> CacheResult<Option<Duration>> {
        Ok(self.entry(slug).map(|(_, ttl)| ttl))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

pub fn create_test_link(slug: &str, url: &str) -> Link {
    Link {
        id: 1,
        slug: slug.to_string(),
        original_url: url.to_string(),
        original_url_hash: format!("hash-{slug}"),
        password_hash: None,
        is_active: true,
        owner_id: None,
        created_at: Utc::now(),
        expires_at: None,
        click_count: 0,
        notes: None,
    }
}

pub fn create_inactive_link(slug: &str, url: &str) -> Link {
    Link {
        is_active: false,
        ..create_test_link(slug, url)
    }
}

/// A protected link whose password is [`PASSWORD`], hashed at the lowest bcrypt cost.
pub fn create_protected_link(slug: &str, url: &str) -> Link {
    Link {
        password_hash: Some(bcrypt::hash(PASSWORD, 4).unwrap()),
        ..create_test_link(slug, url)
    }
}

pub fn create_test_state(
    repo: Arc<InMemoryLinkRepository>,
    cache: Arc<MemoryCache>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let resolution_service = Arc::new(ResolutionService::new(
        repo.clone(),
        cache.clone(),
        Arc::new(QueuedClickPublisher::new(tx.clone())),
        Arc::new(BcryptVerifier::new()),
        ResolutionSettings::default(),
    ));

    let state = AppState::new(resolution_service, cache, repo, tx);

    (state, rx)
}
