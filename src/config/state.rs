// Application state module
// Read-only runtime state shared by every request

use super::types::Config;
use crate::catalog::CatalogStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogStore,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: CatalogStore::new(config.catalog.data_path()),
            config: config.clone(),
        }
    }

    pub fn static_folder(&self) -> &str {
        &self.config.catalog.static_folder
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
