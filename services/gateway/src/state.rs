use matching_engine::MatchingEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchingEngine>,
}

impl AppState {
    pub fn new(engine: MatchingEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
