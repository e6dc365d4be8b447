//! Click event model for asynchronous click tracking.

use serde::{Deserialize, Serialize};

/// A click on a short link that resulted in a redirect.
///
/// Created by the resolution service after access is granted, buffered in
/// the click queue, and published to the broker by
/// [`crate::domain::click_worker::run_click_worker`].
///
/// The wire format is the compact JSON object `{"slug":"<slug>"}`. There is
/// no schema version or correlation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub slug: String,
}

impl ClickEvent {
    /// Creates a new click event.
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }

    /// Serializes the event into the message body sent to the broker.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
