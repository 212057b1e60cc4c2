//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (
        "DASHBOARD_BACKEND_URL",
        "http://127.0.0.1:8080",
        "Base URL of the media backend API",
    ),
    ("DASHBOARD_PORT", "3000", "Port the dashboard server listens on"),
    (
        "DASHBOARD_HEALTH_INTERVAL_MS",
        "2000",
        "Milliseconds between backend health polls until initialized",
    ),
    (
        "DASHBOARD_REQUEST_TIMEOUT_SECS",
        "30",
        "Timeout for a single backend request",
    ),
    (
        "DASHBOARD_VERIFY_ROUND_TRIP",
        "true",
        "Compare reloaded settings with submitted settings after an apply",
    ),
];

/// Default values indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| DEFS.iter().map(|&(key, default, _)| (key, default)).collect());

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).copied()
}

/// Human-readable description of a setting key.
pub fn describe(key: &str) -> Option<&'static str> {
    DEFS.iter()
        .find(|(k, _, _)| *k == key)
        .map(|&(_, _, description)| description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate_setting;

    #[test]
    fn every_default_is_described_and_valid() {
        for &(key, default, _) in DEFS {
            assert_eq!(get_default(key), Some(default));
            assert!(!describe(key).unwrap_or_default().is_empty(), "{key}");
            assert!(validate_setting(key, default).is_ok(), "{key}");
        }
        assert_eq!(get_default("DASHBOARD_UNKNOWN"), None);
        assert_eq!(describe("DASHBOARD_UNKNOWN"), None);
    }
}
