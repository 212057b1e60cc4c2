use serde::Serialize;
use url::Url;

use super::*;

impl BackendClient {
    /// Execute a GET request. Returns the body of a 2xx response.
    pub(super) async fn get_text(&self, url: Url) -> Result<String, BackendError> {
        let resp = self.http.get(url.clone()).send().await?;
        Self::read_body(url, resp).await
    }

    /// Execute a POST request with a JSON body.
    pub(super) async fn post_json(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<String, BackendError> {
        let resp = self.http.post(url.clone()).json(body).send().await?;
        Self::read_body(url, resp).await
    }

    /// Execute a POST request with no body.
    pub(super) async fn post_empty(&self, url: Url) -> Result<String, BackendError> {
        let resp = self.http.post(url.clone()).send().await?;
        Self::read_body(url, resp).await
    }

    async fn read_body(url: Url, resp: reqwest::Response) -> Result<String, BackendError> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Backend returned error status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}
