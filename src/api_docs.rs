use utoipa::OpenApi;
use crate::config;
use crate::controllers::estimate_controller;
use crate::models::{estimate, report};

#[derive(OpenApi)]
#[openapi(
    paths(
        estimate_controller::calculate_estimate,
        estimate_controller::get_latest_estimate,
        estimate_controller::get_report,
        estimate_controller::export_report,
        estimate_controller::list_locations,
        estimate_controller::list_layouts,
        estimate_controller::get_health
    ),
    components(
        schemas(
            estimate::FieldValue,
            estimate::RawInput,
            estimate::Location,
            estimate::InputSet,
            estimate::ReferenceFigures,
            estimate::EstimateResult,
            report::ReportLayout,
            report::MetricKey,
            report::MetricRow,
            report::ReportView,
            report::EstimateResponse,
            report::LocationInfo,
            report::LayoutInfo,
            report::HealthStatus,
            config::EstimateParams
        )
    ),
    tags(
        (name = "solar-savings-estimator", description = "Solar Savings Estimate API")
    )
)]
pub struct ApiDoc;
