pub mod auth;
pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::search::SearchService;
use crate::store::IdentityDirectory;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: SearchService,
    pub directory: Arc<dyn IdentityDirectory>,
    pub metrics_enabled: bool,
}

impl AppState {
    pub fn new(search: SearchService, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self {
            search,
            directory,
            metrics_enabled: true,
        }
    }

    /// Toggle the `/metrics` endpoint
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }
}
