use std::sync::Arc;

use crate::observability::Metrics;
use crate::presenter::PresenterRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PresenterRegistry>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(registry: PresenterRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
