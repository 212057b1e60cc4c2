//! REST API handlers grouped by domain.

pub mod onboarding;
pub mod services;
pub mod settings;

use axum::Json;
use axum::http::StatusCode;
use backend_client::BackendError;
use serde_json::{Value, json};
use settings_schema::ConfigCategory;

use crate::apply::ApplyError;
use crate::wizard::WizardError;

pub type ApiError = (StatusCode, Json<Value>);

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> ApiError {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}

pub(crate) fn parse_category(raw: &str) -> Result<ConfigCategory, ApiError> {
    raw.parse()
        .map_err(|_| err_json(404, &format!("Unknown settings category: {raw}")))
}

pub(crate) fn backend_error(e: &BackendError) -> ApiError {
    if e.is_unavailable() {
        tracing::warn!("Backend request failed: {e}");
        err_json(503, "backend unavailable")
    } else {
        tracing::error!("Backend settings do not match the known schema: {e}");
        err_json(500, &e.to_string())
    }
}

pub(crate) fn apply_error(e: &ApplyError) -> ApiError {
    match e {
        ApplyError::BackendUnavailable { step, .. } => {
            tracing::warn!("Apply failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "error": "backend unavailable", "step": step })),
            )
        }
        ApplyError::RoundTripDrift { category, keys } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "error": e.to_string(),
                "category": category,
                "keys": keys,
            })),
        ),
        ApplyError::Form(_) => err_json(400, &e.to_string()),
        ApplyError::Schema(_) => {
            tracing::error!("Apply failed: {e}");
            err_json(500, &e.to_string())
        }
    }
}

pub(crate) fn wizard_error(e: &WizardError) -> ApiError {
    match e {
        WizardError::Apply(e) => apply_error(e),
        WizardError::Backend(e) => backend_error(e),
        WizardError::StepOutOfRange(_) => err_json(404, &e.to_string()),
        WizardError::Store(_) => {
            tracing::error!("Wizard state error: {e}");
            err_json(500, &e.to_string())
        }
    }
}
