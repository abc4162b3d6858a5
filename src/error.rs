use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::report_renderer::RenderError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No estimate has been calculated yet")]
    NoEstimate,
    #[error("Report error: {0}")]
    Render(#[from] RenderError),
}

/// Converts `AppError` into an HTTP response with a JSON `error` body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NoEstimate => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Render(render_err) => {
                tracing::error!(error = ?render_err, "Report export failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The report could not be exported".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
