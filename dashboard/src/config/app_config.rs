//! Runtime application configuration loaded from the environment.

use std::time::Duration;

use super::defaults::{describe, get_default};
use super::validation::validate_setting;

/// Runtime configuration of the dashboard server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub server_port: u16,
    pub health_interval: Duration,
    pub request_timeout: Duration,
    pub verify_round_trip: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8080".into(),
            server_port: 3000,
            health_interval: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(30),
            verify_round_trip: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Invalid values are
    /// reported and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String { resolve(&lookup, key) };

        Self {
            backend_url: g("DASHBOARD_BACKEND_URL"),
            server_port: parse_or(&g("DASHBOARD_PORT"), 3000),
            health_interval: Duration::from_millis(parse_or(&g("DASHBOARD_HEALTH_INTERVAL_MS"), 2000)),
            request_timeout: Duration::from_secs(parse_or(&g("DASHBOARD_REQUEST_TIMEOUT_SECS"), 30)),
            verify_round_trip: g("DASHBOARD_VERIFY_ROUND_TRIP") == "true",
        }
    }
}

fn resolve(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> String {
    let default = get_default(key).unwrap_or_default();
    match lookup(key) {
        Some(value) if !value.is_empty() => match validate_setting(key, &value) {
            Ok(()) => value,
            Err(e) => {
                tracing::warn!(
                    "Invalid {key}={value:?} ({e}), using default {default:?} [{}]",
                    describe(key).unwrap_or_default()
                );
                default.to_string()
            }
        },
        _ => default.to_string(),
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
