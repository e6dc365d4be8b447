//! Click publisher trait.

use async_trait::async_trait;

/// Emits a click notification for a granted redirect.
///
/// Publishing is best effort. Implementations catch and log every failure
/// internally; nothing is ever returned to the caller, so a broker outage
/// can never change a redirect decision.
///
/// # Implementations
///
/// - [`crate::infrastructure::messaging::QueuedClickPublisher`] - non-blocking hand-off to the click worker
/// - [`crate::infrastructure::messaging::AmqpClickPublisher`] - direct RabbitMQ publish, connection per call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickPublisher: Send + Sync {
    /// Attempts once to emit `{"slug": slug}`.
    async fn publish_click(&self, slug: &str);
}
