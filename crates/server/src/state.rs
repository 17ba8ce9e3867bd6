use std::sync::Arc;

use scholar_watcher_core::{Config, CycleScheduler, SanitizedConfig, WatchStore};

/// Shared application state
pub struct AppState {
    config: Config,
    store: Arc<dyn WatchStore>,
    scheduler: Arc<CycleScheduler>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn WatchStore>, scheduler: Arc<CycleScheduler>) -> Self {
        Self {
            config,
            store,
            scheduler,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn store(&self) -> &dyn WatchStore {
        self.store.as_ref()
    }

    pub fn scheduler(&self) -> &CycleScheduler {
        self.scheduler.as_ref()
    }
}
