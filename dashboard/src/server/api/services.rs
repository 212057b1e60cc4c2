//! GET /api/services – fresh service status with catalog labels.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use settings_schema::{CATALOG, ReadinessRequirement, is_ready};

use crate::app::SharedState;

use super::{ApiError, backend_error};

pub async fn list_services(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let status = state.backend().services().await.map_err(|e| backend_error(&e))?;

    let services: Vec<Value> = CATALOG
        .iter()
        .map(|entry| {
            json!({
                "name": entry.service,
                "label": entry.label,
                "category": entry.category,
                "initialized": status.is_initialized(entry.service),
            })
        })
        .collect();

    Ok(Json(json!({
        "ready": is_ready(&status, &ReadinessRequirement::main_gate()),
        "services": services,
    })))
}
