//! Link entity and its cache-resident projection.

use chrono::{DateTime, Utc};

/// A short link as stored in the durable repository.
///
/// Links are created and updated by the link-management side; the redirect
/// service only ever reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub original_url: String,
    pub original_url_hash: String,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
    pub notes: Option<String>,
}

impl Link {
    /// Returns true if the link requires a password before redirecting.
    ///
    /// An empty stored hash counts as "no protection".
    pub fn is_protected(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// The subset of a [`Link`] needed to decide a redirect.
///
/// This is what gets cached. `password_hash` is `None` for unprotected links;
/// an empty hash is never stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSnapshot {
    pub original_url: String,
    pub is_active: bool,
    pub password_hash: Option<String>,
}

impl LinkSnapshot {
    /// Creates a snapshot, folding an empty password hash into `None`.
    pub fn new(original_url: String, is_active: bool, password_hash: Option<String>) -> Self {
        Self {
            original_url,
            is_active,
            password_hash: password_hash.filter(|h| !h.is_empty()),
        }
    }
}

impl From<&Link> for LinkSnapshot {
    fn from(link: &Link) -> Self {
        Self::new(
            link.original_url.clone(),
            link.is_active,
            link.password_hash.clone(),
        )
    }
}
