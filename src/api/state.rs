use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::storage::{Snapshot, TournamentStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TournamentStore>,
    pub snapshot: Arc<RwLock<Snapshot>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn TournamentStore>, snapshot: Snapshot, config: AppConfig) -> Self {
        Self {
            store,
            snapshot: Arc::new(RwLock::new(snapshot)),
            config: Arc::new(config),
        }
    }
}
