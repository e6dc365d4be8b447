//! PostgreSQL repository implementations.
//!
//! - [`PgLinkRepository`] - Link lookups by slug

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
