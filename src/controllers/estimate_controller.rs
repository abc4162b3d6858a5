use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::models::estimate::{Location, RawInput};
use crate::models::report::{
    EstimateResponse, HealthStatus, LayoutInfo, LocationInfo, ReportLayout, ReportQuery,
    ReportView,
};
use crate::services::estimate_engine;
use crate::services::input_normalizer;
use crate::services::report_renderer::{ReportRenderer, TextReportRenderer};
use crate::shared_state::AppState;

/// POST /api/estimate
/// Calculate an estimate from the calculator form
///
/// Every field is optional and may be sent as a number or as the raw text of
/// the input; unreadable values count as zero. The result replaces the
/// previously stored estimate.
#[utoipa::path(
    post,
    path = "/api/estimate",
    params(
        ("layout" = Option<ReportLayout>, Query, description = "Card layout: full (default) or summary")
    ),
    request_body = RawInput,
    responses(
        (status = 200, description = "Computed estimate and rendered cards", body = EstimateResponse)
    )
)]
pub async fn calculate_estimate(
    State(state): State<AppState>,
    State(config): State<Config>,
    State(renderer): State<TextReportRenderer>,
    Query(query): Query<ReportQuery>,
    Json(raw): Json<RawInput>,
) -> Json<EstimateResponse> {
    let input = input_normalizer::normalize(&raw);
    let result = estimate_engine::compute(&input, &config.estimate);
    let report = renderer.render(&result, query.layout.unwrap_or_default());

    let response = EstimateResponse {
        id: Uuid::new_v4(),
        computed_at: Utc::now(),
        input,
        result,
        report,
    };
    tracing::info!(
        id = %response.id,
        savings = %response.result.estimated_monthly_savings,
        cost = %response.result.estimated_system_cost,
        warning = response.result.advisory_warning.is_some(),
        "Estimate calculated"
    );
    state.set_latest(response.clone());
    Json(response)
}

/// GET /api/estimate/latest
/// Get the most recently calculated estimate
#[utoipa::path(
    get,
    path = "/api/estimate/latest",
    responses(
        (status = 200, description = "Latest estimate", body = EstimateResponse),
        (status = 404, description = "No estimate calculated yet")
    )
)]
pub async fn get_latest_estimate(
    State(state): State<AppState>,
) -> Result<Json<EstimateResponse>, AppError> {
    state.get_latest().map(Json).ok_or(AppError::NoEstimate)
}

/// GET /api/report
/// Render the latest estimate as labelled cards
#[utoipa::path(
    get,
    path = "/api/report",
    params(
        ("layout" = Option<ReportLayout>, Query, description = "Overrides the layout used at calculation time")
    ),
    responses(
        (status = 200, description = "Rendered report", body = ReportView),
        (status = 404, description = "No estimate calculated yet")
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    State(renderer): State<TextReportRenderer>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportView>, AppError> {
    let latest = state.get_latest().ok_or(AppError::NoEstimate)?;
    let layout = query.layout.unwrap_or(latest.report.layout);
    Ok(Json(renderer.render(&latest.result, layout)))
}

/// GET /api/report/export
/// Download the latest report as a document
///
/// The document contains the displayed cards verbatim. A failed export
/// leaves the stored estimate untouched.
#[utoipa::path(
    get,
    path = "/api/report/export",
    params(
        ("layout" = Option<ReportLayout>, Query, description = "Overrides the layout used at calculation time")
    ),
    responses(
        (status = 200, description = "Report document", body = String, content_type = "text/plain"),
        (status = 404, description = "No estimate calculated yet"),
        (status = 500, description = "Export failed")
    )
)]
pub async fn export_report(
    State(state): State<AppState>,
    State(renderer): State<TextReportRenderer>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let latest = state.get_latest().ok_or(AppError::NoEstimate)?;
    let layout = query.layout.unwrap_or(latest.report.layout);
    let view = renderer.render(&latest.result, layout);
    let doc = renderer.export(&view)?;

    tracing::info!(id = %latest.id, filename = %doc.filename, bytes = doc.body.len(), "Report exported");
    let disposition = format!("attachment; filename=\"{}\"", doc.filename);
    Ok((
        [
            (header::CONTENT_TYPE, doc.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        doc.body,
    )
        .into_response())
}

/// GET /api/locations
/// List selectable locations
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Location tags and names", body = Vec<LocationInfo>)
    )
)]
pub async fn list_locations() -> Json<Vec<LocationInfo>> {
    let locations = Location::ALL
        .into_iter()
        .map(|l| LocationInfo {
            tag: l.tag().to_string(),
            name: l.display_name().to_string(),
        })
        .collect();
    Json(locations)
}

/// GET /api/layouts
/// List report layouts and the metrics each one shows
#[utoipa::path(
    get,
    path = "/api/layouts",
    responses(
        (status = 200, description = "Available layouts", body = Vec<LayoutInfo>)
    )
)]
pub async fn list_layouts() -> Json<Vec<LayoutInfo>> {
    let layouts = ReportLayout::ALL
        .into_iter()
        .map(|layout| LayoutInfo {
            layout,
            metrics: layout.metrics().to_vec(),
        })
        .collect();
    Json(layouts)
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        has_result: state.get_latest().is_some(),
    })
}
