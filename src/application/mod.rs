//! Application layer services implementing business logic.
//!
//! Services consume repository and infrastructure traits and expose a small
//! API to HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::resolution_service::ResolutionService`] - Slug resolution and redirect authorization

pub mod services;
