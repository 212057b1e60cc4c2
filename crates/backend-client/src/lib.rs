//! Media backend integration client library.
//!
//! Provides typed access to the backend's settings mutation, persistence,
//! aggregate service status and health endpoints.

pub mod api;

pub use api::BackendClient;
pub use api::models::{HealthResponse, ServicesResponse, SetOutcome};

/// Unified error type for the backend-client crate.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Unexpected settings shape: {0}")]
    Schema(#[from] settings_schema::TransformError),
}

impl BackendError {
    /// Whether the failure means the backend could not be reached or did not
    /// answer successfully, as opposed to answering with data we cannot model.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, BackendError::Schema(_))
    }
}
