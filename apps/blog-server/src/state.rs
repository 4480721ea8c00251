//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::PostStore;
use blog_infra::{InMemoryPostStore, JsonFilePostStore};

use crate::config::StorageConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
}

impl AppState {
    /// Build the application state with the configured store.
    pub fn new(storage: &StorageConfig) -> Self {
        let store: Arc<dyn PostStore> = match storage {
            StorageConfig::JsonFile(path) => {
                tracing::info!(path = %path.display(), "Using JSON file post store");
                Arc::new(JsonFilePostStore::new(path.clone()))
            }
            StorageConfig::Memory => {
                tracing::warn!("Using in-memory post store - posts are lost on restart");
                Arc::new(InMemoryPostStore::new())
            }
        };

        let state = Self::with_store(store);
        tracing::info!("Application state initialized");
        state
    }

    pub fn with_store(store: Arc<dyn PostStore>) -> Self {
        Self {
            posts: Arc::new(PostService::new(store)),
        }
    }
}
