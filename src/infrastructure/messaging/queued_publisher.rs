//! Channel-backed click publisher.

use super::service::ClickPublisher;
use crate::domain::click_event::ClickEvent;
use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

/// Hands click events to the background click worker without waiting.
///
/// Uses `try_send` on a bounded channel: when the queue is full the click is
/// dropped and logged, so a slow broker never delays a redirect.
pub struct QueuedClickPublisher {
    sender: mpsc::Sender<ClickEvent>,
}

impl QueuedClickPublisher {
    pub fn new(sender: mpsc::Sender<ClickEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl ClickPublisher for QueuedClickPublisher {
    async fn publish_click(&self, slug: &str) {
        match self.sender.try_send(ClickEvent::new(slug)) {
            Ok(()) => debug!("Click queued for {}", slug),
            Err(TrySendError::Full(event)) => {
                warn!("Click queue full, dropping click for {}", event.slug)
            }
            Err(TrySendError::Closed(event)) => {
                error!("Click queue closed, dropping click for {}", event.slug)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_enqueues_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let publisher = QueuedClickPublisher::new(tx);

        publisher.publish_click("abc").await;

        assert_eq!(rx.try_recv().unwrap(), ClickEvent::new("abc"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let (tx, mut rx) = mpsc::channel(1);
        let publisher = QueuedClickPublisher::new(tx);

        publisher.publish_click("first").await;
        publisher.publish_click("second").await;

        assert_eq!(rx.try_recv().unwrap().slug, "first");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_queue_is_swallowed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let publisher = QueuedClickPublisher::new(tx);

        publisher.publish_click("gone").await;
    }
}
