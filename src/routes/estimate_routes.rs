use axum::{routing::{get, post}, Router};
use crate::controllers::estimate_controller::{
    // Calculation
    calculate_estimate, get_latest_estimate,
    // Report
    get_report, export_report,
    // Reference data & health
    list_locations, list_layouts, get_health,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>`, `State<Config>` and
/// `State<TextReportRenderer>` via `FromRef<SharedState>`.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/estimate",          post(calculate_estimate))
        .route("/estimate/latest",   get(get_latest_estimate))
        .route("/report",            get(get_report))
        .route("/report/export",     get(export_report))
        .route("/locations",         get(list_locations))
        .route("/layouts",           get(list_layouts))
        .route("/health",            get(get_health))
        .with_state(shared)
}
