//! Request guards applied to every route.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use settings_schema::ReadinessRequirement;

use crate::app::SharedState;
use crate::gate::{self, GateDecision, ONBOARDING_PATH};

use super::api::err_json;

const UNGUARDED_PATHS: &[&str] = &["/health", "/status"];

/// Answers `503` with `Retry-After` until the backend has been seen fully
/// initialized.
pub async fn initialization_guard(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    if state.is_initialized() || UNGUARDED_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let retry_after = state.config().health_interval.as_secs().max(1);
    let mut response = err_json(503, "backend initializing").into_response();
    if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }
    response
}

/// Redirects safe-method navigation to onboarding while the main
/// requirement is unmet.
pub async fn readiness_gate(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let requirement = ReadinessRequirement::main_gate();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let decision = gate::check(state.backend(), &method, &path, &requirement).await;

    match decision {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToOnboarding => Redirect::to(ONBOARDING_PATH).into_response(),
        GateDecision::BackendError => err_json(503, "backend unavailable").into_response(),
    }
}
