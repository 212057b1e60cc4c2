//! Setting value validation.

use url::Url;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "DASHBOARD_BACKEND_URL" => {
            let url = Url::parse(value).map_err(|e| format!("must be a URL: {e}"))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err("must use http or https".into());
            }
        }
        "DASHBOARD_PORT" => validate_int_range(value, 1, 65535)?,
        "DASHBOARD_HEALTH_INTERVAL_MS" => validate_int_range(value, 100, 60_000)?,
        "DASHBOARD_REQUEST_TIMEOUT_SECS" => validate_int_range(value, 1, 600)?,
        "DASHBOARD_VERIFY_ROUND_TRIP" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
