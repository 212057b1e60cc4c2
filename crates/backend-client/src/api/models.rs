//! Wire shapes of backend responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use settings_schema::ServiceStatusMap;

/// `{ "data": ... }` envelope used by the settings endpoints.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Response of `GET /services`.
#[derive(Debug, Deserialize)]
pub struct ServicesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Response of `GET /health`. `message` is `true` once fully initialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: bool,
}

/// Interpreted response of `POST /settings/set`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOutcome {
    /// Backend's own overall verdict.
    pub success: bool,
    /// Status of the services the backend tried to (re)initialize.
    pub statuses: ServiceStatusMap,
}

impl SetOutcome {
    pub(crate) fn from_data(data: &Map<String, Value>) -> Self {
        Self {
            success: data.get("success").and_then(Value::as_bool).unwrap_or(false),
            statuses: ServiceStatusMap::from_wire(data),
        }
    }
}
