mod ui;

use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;

use crate::{api::colors::Detection, AppState};

pub use ui::ui_ws;

/// Build the WebSocket router
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ui", axum::routing::get(ui_ws))
}

/// Thread-safe holder of the most recent pixel detection
#[derive(Default)]
pub struct DetectionState(RwLock<Option<Detection>>);

impl DetectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last(&self) -> Option<Detection> {
        self.0.read().await.clone()
    }

    pub async fn record(&self, detection: Detection) {
        *self.0.write().await = Some(detection);
    }
}
