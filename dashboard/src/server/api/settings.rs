//! Settings API:
//!   GET  /api/settings/{category} – current values as flat dotted keys
//!   POST /api/settings/{category} – apply a flat dotted-key form

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use settings_schema::{FieldMap, extract};

use crate::app::SharedState;

use super::{ApiError, apply_error, backend_error, err_json, parse_category};

/// GET /api/settings/{category}
pub async fn get_settings(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let category = parse_category(&category)?;
    let document = state
        .backend()
        .get_document(&[category])
        .await
        .map_err(|e| backend_error(&e))?;
    let fields = extract(&document, category)
        .fields()
        .map_err(|e| err_json(500, &e.to_string()))?;

    Ok(Json(json!({
        "category": category,
        "label": category.label(),
        "fields": fields,
    })))
}

/// POST /api/settings/{category}
pub async fn apply_settings(
    State(state): State<SharedState>,
    Path(category): Path<String>,
    Json(fields): Json<FieldMap>,
) -> Result<Response, ApiError> {
    let category = parse_category(&category)?;

    let Some(_guard) = state.begin_apply(category) else {
        return Err(err_json(409, &format!("An apply of {category} is already in progress")));
    };
    let result = state
        .coordinator()
        .apply_form(category, &fields, &[])
        .await
        .map_err(|e| apply_error(&e))?;

    let status = if result.succeeded {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Json(result)).into_response())
}
