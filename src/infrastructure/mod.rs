//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching, messaging and
//! password verification.
//!
//! # Modules
//!
//! - [`cache`] - Link snapshot cache (Redis and no-op implementations)
//! - [`messaging`] - Click event publishing (RabbitMQ and in-process queue)
//! - [`persistence`] - PostgreSQL repository implementation
//! - [`security`] - Password hash verification

pub mod cache;
pub mod messaging;
pub mod persistence;
pub mod security;
