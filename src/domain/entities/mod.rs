//! Core domain entities.
//!
//! - [`Link`] - A short link as stored in the durable repository
//! - [`LinkSnapshot`] - The cached projection of a link used to decide redirects

pub mod link;

pub use link::{Link, LinkSnapshot};
