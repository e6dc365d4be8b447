//! Outcome of resolving a slug.

/// The decision reached for one redirect request.
///
/// Produced fresh per call and never persisted. Infrastructure failures are
/// not outcomes; they surface as [`crate::error::ResolveError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Access granted; redirect to the stored URL.
    Redirect(String),
    /// No link with this slug exists (or it was negatively cached).
    NotFound,
    /// The link exists but has been deactivated.
    Inactive,
    /// The link is password protected and no valid password was given.
    Unauthorized,
}

impl ResolutionOutcome {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Redirect(_) => "redirect",
            Self::NotFound => "not_found",
            Self::Inactive => "inactive",
            Self::Unauthorized => "unauthorized",
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}
