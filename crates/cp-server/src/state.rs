//! Application state shared across all handlers.

use crate::store::{InMemoryPuzzleStore, PuzzleStore};
use cp_codec::PuzzleCodec;
use cp_core::AppConfig;
use cp_session::SessionManager;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub codec: PuzzleCodec,
    pub sessions: Arc<SessionManager>,
    pub store: Arc<dyn PuzzleStore>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryPuzzleStore::new()))
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn PuzzleStore>) -> Self {
        Self {
            codec: PuzzleCodec::new(config.game.palette.clone()),
            config: Arc::new(config),
            sessions: Arc::new(SessionManager::new()),
            store,
            start_time: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
