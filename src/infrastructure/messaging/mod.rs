//! Click event emission.
//!
//! Provides a [`ClickPublisher`] trait with two implementations:
//! - [`QueuedClickPublisher`] - Non-blocking hand-off used on the request path
//! - [`AmqpClickPublisher`] - RabbitMQ publisher used by the click worker

mod amqp_publisher;
mod queued_publisher;
mod service;

pub use amqp_publisher::AmqpClickPublisher;
pub use queued_publisher::QueuedClickPublisher;
pub use service::ClickPublisher;

#[cfg(test)]
pub use service::MockClickPublisher;
