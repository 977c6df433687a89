pub mod api;
pub mod error;
pub mod identity;
pub mod state;

use std::sync::Arc;

use application::{OfflineQueue, WeighingEngine};
use state::AppState;

pub fn setup_app_state(engine: Arc<WeighingEngine>, queue: Arc<OfflineQueue>) -> Arc<AppState> {
    Arc::new(AppState::new(engine, queue))
}
