use settings_schema::ServiceStatusMap;

use super::models::{HealthResponse, ServicesResponse};
use super::*;

impl BackendClient {
    /// Aggregate initialization status of every service the backend knows.
    pub async fn services(&self) -> Result<ServiceStatusMap, BackendError> {
        let url = self.endpoint("services")?;
        let body = self.get_text(url).await?;
        let resp: ServicesResponse = serde_json::from_str(&body)?;
        if !resp.success {
            tracing::debug!("Backend reported unsuccessful service status fetch");
        }
        Ok(ServiceStatusMap::from_wire(&resp.data))
    }

    /// Whether the backend reports itself fully initialized.
    pub async fn health(&self) -> Result<bool, BackendError> {
        let url = self.endpoint("health")?;
        let body = self.get_text(url).await?;
        let resp: HealthResponse = serde_json::from_str(&body)?;
        Ok(resp.message)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use settings_schema::ServiceName;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn services_parses_status_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "symlink": false, "symlinklibrary": true }
            })))
            .mount(&server)
            .await;

        let status = client(&server).services().await.unwrap();
        assert!(!status.is_initialized(ServiceName::Symlink));
        assert!(status.is_initialized(ServiceName::SymlinkLibrary));
    }

    #[tokio::test]
    async fn services_unavailable_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server).services().await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 503, .. }));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn health_reads_message_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": true })))
            .mount(&server)
            .await;

        assert!(client(&server).health().await.unwrap());
    }

    #[tokio::test]
    async fn unreachable_backend_is_http_error() {
        let client = BackendClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }
}
