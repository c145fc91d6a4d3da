use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::storage::store::LocalStore;

// Explicit application state, passed around instead of living in a global.
// The epoch counter makes stale generations detectable: results from a
// run that is no longer current are dropped, never surfaced.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: LocalStore,
    generation_epoch: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: LocalStore) -> Self {
        AppState {
            config,
            store,
            generation_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn begin_generation(&self) -> u64 {
        self.generation_epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current_epoch(&self) -> u64 {
        self.generation_epoch.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.current_epoch() == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_state() -> AppState {
        let config = Config {
            log_level: "info".to_string(),
            database_url: "sqlite::memory:".to_string(),
            api_base_url: "http://127.0.0.1:1".to_string(),
            text_api_key: String::new(),
            image_api_key: String::new(),
            text_model: "deepseek-v3-250324".to_string(),
            image_model: "gpt-4o-image".to_string(),
            text_temperature: 0.8,
            text_max_tokens: 1000,
            request_timeout_seconds: 2,
            image_request_delay_ms: 0,
            image_api_mode: crate::config::ImageApiMode::Chat,
            image_size: "1024x1024".to_string(),
            image_quality: "standard".to_string(),
        };
        let store = LocalStore::init(&config.database_url).await.unwrap();
        AppState::new(Arc::new(config), store)
    }

    #[tokio::test]
    async fn epochs_are_monotonic_and_stale_runs_are_detectable() {
        let state = test_state().await;
        let first = state.begin_generation();
        assert!(state.is_current(first));

        let second = state.begin_generation();
        assert!(second > first);
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }
}
