use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use axum::extract::FromRef;

use crate::config::Config;
use crate::models::report::EstimateResponse;
use crate::services::report_renderer::TextReportRenderer;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Most recent estimate; replaced wholesale on every calculation
    pub latest: Arc<RwLock<Option<EstimateResponse>>>,
    pub started_at: Instant,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            latest: Arc::new(RwLock::new(None)),
            started_at: Instant::now(),
        }
    }

    /// Recovers from lock poisoning; the slot only ever holds a whole estimate.
    pub fn set_latest(&self, estimate: EstimateResponse) {
        let mut slot = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(estimate);
    }

    pub fn get_latest(&self) -> Option<EstimateResponse> {
        let slot = self.latest.read().unwrap_or_else(PoisonError::into_inner);
        slot.clone()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Router state. Handlers extract `State<AppState>`, `State<Config>` or
/// `State<TextReportRenderer>` through `FromRef`.
#[derive(Clone, Debug)]
pub struct SharedState {
    pub app: AppState,
    pub config: Config,
    pub renderer: TextReportRenderer,
}

impl SharedState {
    pub fn new(config: Config) -> Self {
        let renderer = TextReportRenderer::new(&config.report);
        Self {
            app: AppState::new(),
            config,
            renderer,
        }
    }
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> Self {
        shared.app.clone()
    }
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Self {
        shared.config.clone()
    }
}

impl FromRef<SharedState> for TextReportRenderer {
    fn from_ref(shared: &SharedState) -> Self {
        shared.renderer.clone()
    }
}
