//! Readiness gate: keeps safe-method navigation away from the main
//! application until the required services report initialized.

use axum::http::Method;
use backend_client::{BackendClient, BackendError};
use settings_schema::{ReadinessRequirement, ServiceStatusMap, is_ready};

/// Entry point of the onboarding wizard; target of every gate redirect.
pub const ONBOARDING_PATH: &str = "/onboarding";

const EXEMPT_PREFIXES: &[&str] = &["/api/"];
const EXEMPT_PATHS: &[&str] = &["/health", "/status"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToOnboarding,
    /// Status could not be fetched; the gate fails closed.
    BackendError,
}

/// Requests the gate never inspects: mutations, the onboarding routes and
/// the dashboard's own JSON and liveness endpoints.
pub fn is_exempt(method: &Method, path: &str) -> bool {
    if !method.is_safe() {
        return true;
    }
    if path == ONBOARDING_PATH || path.starts_with("/onboarding/") {
        return true;
    }
    EXEMPT_PATHS.contains(&path) || EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p))
}

impl GateDecision {
    pub fn evaluate(
        method: &Method,
        path: &str,
        status: Result<&ServiceStatusMap, &BackendError>,
        requirement: &ReadinessRequirement,
    ) -> Self {
        if is_exempt(method, path) {
            return GateDecision::Allow;
        }
        match status {
            Ok(status) if is_ready(status, requirement) => GateDecision::Allow,
            Ok(_) => GateDecision::RedirectToOnboarding,
            Err(_) => GateDecision::BackendError,
        }
    }
}

/// Fetch a fresh status map when the request is not exempt and decide.
pub async fn check(
    backend: &BackendClient,
    method: &Method,
    path: &str,
    requirement: &ReadinessRequirement,
) -> GateDecision {
    if is_exempt(method, path) {
        return GateDecision::Allow;
    }
    let status = backend.services().await;
    let decision = GateDecision::evaluate(method, path, status.as_ref(), requirement);
    match (&decision, &status) {
        (GateDecision::BackendError, Err(e)) => {
            tracing::warn!(%path, "Readiness check failed: {e}");
        }
        (GateDecision::RedirectToOnboarding, Ok(status)) => {
            tracing::debug!(
                %path,
                unmet = ?requirement.unmet(status),
                "Not ready, redirecting to onboarding"
            );
        }
        _ => {}
    }
    decision
}
