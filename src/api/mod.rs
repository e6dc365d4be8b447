//! HTTP layer: maps requests onto the resolution service and outcomes onto
//! responses.
//!
//! # Modules
//!
//! - [`dto`] - Query and response types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
