//! Media backend REST API client.
//!
//! Every call is a single request/response with no retries; retry policy
//! belongs to the caller.

mod request;
mod services;
mod settings;

pub mod models;

use std::time::Duration;

use url::Url;

use crate::BackendError;

/// Media backend API client bound to one base URL.
#[derive(Clone)]
pub struct BackendClient {
    pub(super) http: reqwest::Client,
    pub(super) base: Url,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = BackendClient::new("http://backend:8080/api", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.endpoint("/settings/save").unwrap().as_str(),
            "http://backend:8080/api/settings/save"
        );
        assert_eq!(
            client.endpoint("services").unwrap().as_str(),
            "http://backend:8080/api/services"
        );
    }

    #[test]
    fn new_rejects_invalid_url() {
        assert!(matches!(
            BackendClient::new("not a url", Duration::from_secs(5)),
            Err(BackendError::UrlParse(_))
        ));
    }
}
