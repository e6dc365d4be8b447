//! Background worker that forwards queued clicks to the broker.

use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::domain::click_event::ClickEvent;
use crate::infrastructure::messaging::ClickPublisher;

/// Drains the click queue and publishes each event through `publisher`.
///
/// At most `concurrency` publishes are in flight at once.
///
/// When `shutdown` fires (or its sender is dropped) the queue is closed to
/// new clicks, everything already buffered is still published, and the
/// worker returns after in-flight publishes finish. It also returns once
/// every sender has been dropped and the queue is empty.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    publisher: Arc<dyn ClickPublisher>,
    concurrency: usize,
    mut shutdown: oneshot::Receiver<()>,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();
    let mut closing = false;

    loop {
        let event = tokio::select! {
            event = rx.recv() => event,
            _ = &mut shutdown, if !closing => {
                info!("Closing click queue, draining buffered clicks");
                rx.close();
                closing = true;
                continue;
            }
        };

        let Some(event) = event else {
            break;
        };

        let Ok(permit) = permits.clone().acquire_owned().await else {
            warn!("Click worker semaphore closed");
            break;
        };

        let publisher = publisher.clone();
        in_flight.spawn(async move {
            publisher.publish_click(&event.slug).await;
            drop(permit);
        });

        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}

    info!("Click worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::messaging::MockClickPublisher;

    #[tokio::test]
    async fn test_worker_publishes_every_event_then_stops() {
        let mut publisher = MockClickPublisher::new();
        publisher
            .expect_publish_click()
            .withf(|slug| slug.starts_with("code"))
            .times(3)
            .returning(|_| ());

        let (tx, rx) = mpsc::channel(8);
        for i in 0..3 {
            tx.send(ClickEvent::new(format!("code{i}"))).await.unwrap();
        }
        drop(tx);

        let (_stop_tx, stop_rx) = oneshot::channel();
        run_click_worker(rx, Arc::new(publisher), 2, stop_rx).await;
    }

    #[tokio::test]
    async fn test_worker_with_empty_closed_queue_returns() {
        let mut publisher = MockClickPublisher::new();
        publisher.expect_publish_click().times(0);

        let (tx, rx) = mpsc::channel::<ClickEvent>(1);
        drop(tx);

        let (_stop_tx, stop_rx) = oneshot::channel();
        run_click_worker(rx, Arc::new(publisher), 1, stop_rx).await;
    }

    #[tokio::test]
    async fn test_shutdown_drains_buffer_and_rejects_new_clicks() {
        let mut publisher = MockClickPublisher::new();
        publisher
            .expect_publish_click()
            .withf(|slug| slug == "buffered")
            .times(2)
            .returning(|_| ());

        let (tx, rx) = mpsc::channel(8);
        tx.send(ClickEvent::new("buffered")).await.unwrap();
        tx.send(ClickEvent::new("buffered")).await.unwrap();

        let (stop_tx, stop_rx) = oneshot::channel();
        stop_tx.send(()).unwrap();

        // `tx` is still alive: only the shutdown signal lets the worker return.
        run_click_worker(rx, Arc::new(publisher), 1, stop_rx).await;

        assert!(tx.is_closed());
        assert!(tx.try_send(ClickEvent::new("late")).is_err());
    }
}
