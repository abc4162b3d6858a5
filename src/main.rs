mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;
mod error;

use std::net::SocketAddr;
use axum::{Router, routing::get, response::Html};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;
use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::estimate_routes::api_routes;
use crate::shared_state::SharedState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Load configuration
    let config = match Config::load_or_default("config.json") {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config.json");
            return;
        }
    };
    tracing::info!(
        savings_rate = %config.estimate.savings_rate,
        unit_panel_cost = %config.estimate.unit_panel_cost,
        co2_factor_per_panel = %config.estimate.co2_factor_per_panel,
        cloudy_day_threshold = config.estimate.cloudy_day_threshold,
        "Estimate model loaded"
    );

    // 2. Initialize shared state
    let server_port = config.server.port;
    let shared = SharedState::new(config);

    // 3. Start Axum HTTP server
    let app = Router::new()
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    tracing::info!("API Server listening on http://{}", addr);
    tracing::info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(error = %e, "HTTP server stopped");
    }
}
