use std::sync::Arc;

use application::{OfflineQueue, WeighingEngine};

pub struct AppState {
    pub engine: Arc<WeighingEngine>,
    pub queue: Arc<OfflineQueue>,
}

impl AppState {
    pub fn new(engine: Arc<WeighingEngine>, queue: Arc<OfflineQueue>) -> Self {
        Self { engine, queue }
    }
}
