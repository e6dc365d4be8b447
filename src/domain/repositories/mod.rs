//! Repository trait definitions for the domain layer.
//!
//! The redirect service only reads links, so [`LinkRepository`] is the single
//! data-access contract. The PostgreSQL implementation lives in
//! `crate::infrastructure::persistence`; a `mockall` mock is generated for tests.

pub mod link_repository;

pub use link_repository::{LinkRepository, RepositoryError};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
