//! Shared application state passed to every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::ResolutionService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheStore;

/// Cheaply cloneable handle to the services behind the HTTP layer.
///
/// `cache` and `link_repository` are the same instances the resolution
/// service uses; they are exposed here for health checks.
#[derive(Clone)]
pub struct AppState {
    pub resolution_service: Arc<ResolutionService>,
    pub cache: Arc<dyn CacheStore>,
    pub link_repository: Arc<dyn LinkRepository>,
    /// Producer side of the click queue, used to report queue health.
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    pub fn new(
        resolution_service: Arc<ResolutionService>,
        cache: Arc<dyn CacheStore>,
        link_repository: Arc<dyn LinkRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            resolution_service,
            cache,
            link_repository,
            click_sender,
        }
    }
}
