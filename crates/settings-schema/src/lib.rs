//! Typed model of the media backend's configuration.
//!
//! Provides the service catalog, per-category settings structures,
//! service status maps and readiness requirements, and the pure
//! transformer between the backend document and per-form views.

pub mod catalog;
pub mod document;
pub mod schema;
pub mod status;
pub mod transform;

pub use catalog::{Activation, CATALOG, ConfigCategory, ServiceEntry, ServiceName};
pub use document::ConfigDocument;
pub use status::{ReadinessRequirement, ServiceStatusMap, is_ready};
pub use transform::{ConfigFragment, FieldMap, PartialView, diff_fields, extract, rebuild, rebuild_changes};

/// Unified error type for the settings-schema crate.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("schema drift: unexpected key `{path}`")]
    SchemaDrift { path: String },

    #[error("invalid value for `{key}`: {message}")]
    InvalidValue { key: String, message: String },

    #[error("unknown configuration category: {0}")]
    UnknownCategory(String),

    #[error("unknown service name: {0}")]
    UnknownService(String),

    #[error("JSON encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
