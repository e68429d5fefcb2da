use std::sync::Arc;

use studyhub_core::catalog::Catalog;
use studyhub_core::store::CatalogStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the catalog and config are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Hierarchy engine and query service over the configured store.
    pub catalog: Catalog,
    /// Server configuration (JWT settings, admin bootstrap list).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, config: ServerConfig) -> Self {
        Self {
            catalog: Catalog::new(store),
            config: Arc::new(config),
        }
    }

    /// The underlying store, for user lookups and health checks.
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        self.catalog.store()
    }
}
