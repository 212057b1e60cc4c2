//! Onboarding wizard routes:
//!   GET  /onboarding        – redirect to the current step, re-checked once finished
//!   GET  /onboarding/{step} – step form, or redirect to the earliest incomplete step
//!   POST /onboarding/{step} – apply the step's form

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;
use settings_schema::{FieldMap, extract};

use crate::app::SharedState;
use crate::wizard::{StepAccess, WizardStep};

use super::{ApiError, backend_error, err_json, wizard_error};

/// GET /onboarding
pub async fn entry(State(state): State<SharedState>) -> Result<Redirect, ApiError> {
    let target = state.wizard().resume().await.map_err(|e| wizard_error(&e))?;
    Ok(Redirect::to(&target.path()))
}

/// GET /onboarding/{step}
pub async fn get_step(
    State(state): State<SharedState>,
    Path(index): Path<u8>,
) -> Result<Response, ApiError> {
    let step = WizardStep::new(index).map_err(|e| wizard_error(&e))?;
    let wizard = state.wizard();

    if let StepAccess::Redirect(target) = wizard.check_access(step).await.map_err(|e| wizard_error(&e))? {
        return Ok(Redirect::to(&target.path()).into_response());
    }

    let category = step.category();
    let document = state
        .backend()
        .get_document(&[category])
        .await
        .map_err(|e| backend_error(&e))?;
    let fields = extract(&document, category)
        .fields()
        .map_err(|e| err_json(500, &e.to_string()))?;
    let cursor = wizard.cursor().map_err(|e| wizard_error(&e))?;

    Ok(Json(json!({
        "step": step,
        "category": category,
        "label": category.label(),
        "fields": fields,
        "unlocked": cursor >= step.index(),
    }))
    .into_response())
}

/// POST /onboarding/{step}
pub async fn submit_step(
    State(state): State<SharedState>,
    Path(index): Path<u8>,
    Json(fields): Json<FieldMap>,
) -> Result<Response, ApiError> {
    let step = WizardStep::new(index).map_err(|e| wizard_error(&e))?;
    let wizard = state.wizard();

    if let StepAccess::Redirect(target) = wizard.check_access(step).await.map_err(|e| wizard_error(&e))? {
        return Ok(Redirect::to(&target.path()).into_response());
    }

    let Some(_guard) = state.begin_apply(step.category()) else {
        return Err(err_json(409, "This step is already being applied"));
    };
    let outcome = wizard.submit(step, &fields).await.map_err(|e| wizard_error(&e))?;

    let status = if outcome.result.succeeded {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((
        status,
        Json(json!({
            "result": outcome.result,
            "next": outcome.next.path(),
        })),
    )
        .into_response())
}
