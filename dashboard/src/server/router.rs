use axum::{
    Json, Router, middleware,
    extract::State,
    routing::get,
};
use serde_json::{Value, json};
use settings_schema::ConfigCategory;
use tower_http::cors::CorsLayer;

use super::api;
use super::middleware::{initialization_guard, readiness_gate};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        // --- Services & settings ---
        .route("/api/services", get(api::services::list_services))
        .route("/api/settings/{category}", get(api::settings::get_settings).post(api::settings::apply_settings))
        // --- Onboarding ---
        .route("/onboarding", get(api::onboarding::entry))
        .route("/onboarding/{step}", get(api::onboarding::get_step).post(api::onboarding::submit_step))
        // --- Main entry point ---
        .route("/", get(index_handler))
        // --- Middleware (last added runs first) ---
        .layer(middleware::from_fn_with_state(state.clone(), readiness_gate))
        .layer(middleware::from_fn_with_state(state.clone(), initialization_guard))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_handler(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "initialized": state.is_initialized() }))
}

async fn index_handler() -> Json<Value> {
    let categories: Vec<Value> = ConfigCategory::ALL
        .into_iter()
        .map(|c| json!({ "category": c, "label": c.label(), "settings": format!("/api/settings/{c}") }))
        .collect();
    Json(json!({ "status": "ok", "categories": categories }))
}
