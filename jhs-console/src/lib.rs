pub mod billing;
pub mod config;
pub mod forms;
pub mod handlers;
pub mod location;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod table;

use config::{ReceiptSettings, Settings};
use services::{ApiClient, ApiError, QueryCache, ResourceService};
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub resources: ResourceService,
    pub receipt: Arc<ReceiptSettings>,
}

impl AppState {
    pub fn new(resources: ResourceService, receipt: ReceiptSettings) -> Self {
        Self {
            resources,
            receipt: Arc::new(receipt),
        }
    }

    /// Backend client and an empty query cache, as configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::new(&settings.backend)?);
        let cache = Arc::new(QueryCache::new(settings.cache.stale_after()));

        Ok(Self::new(
            ResourceService::new(api, cache),
            settings.receipt.clone(),
        ))
    }
}
