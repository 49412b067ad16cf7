use std::sync::Arc;

use crate::config::Config;
use crate::upstream::Fetcher;

/// Read-only per-process state; requests share nothing mutable
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: Arc<dyn Fetcher>,
}

impl AppState {
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }
}
