//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Link and its cached snapshot
//! - [`repositories`] - Data access trait definitions
//! - [`resolution`] - Resolution outcomes
//! - [`click_event`] - Click event model
//! - [`click_worker`] - Asynchronous click publishing worker
//!
//! # Click Processing Flow
//!
//! 1. The resolution service grants a redirect
//! 2. A [`click_event::ClickEvent`] is handed to the click queue (non-blocking)
//! 3. [`click_worker::run_click_worker`] publishes it to the broker
//! 4. Downstream consumers aggregate clicks (outside this service)

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod resolution;
