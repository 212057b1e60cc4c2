use serde_json::{Map, Value};
use settings_schema::{ConfigCategory, ConfigDocument, ConfigFragment};

use super::models::{DataEnvelope, SetOutcome};
use super::*;

impl BackendClient {
    /// Fetch a subset of the configuration by top-level key.
    pub async fn get_settings(&self, keys: &[&str]) -> Result<Map<String, Value>, BackendError> {
        let url = self.endpoint(&format!("settings/get/{}", keys.join(",")))?;
        let body = self.get_text(url).await?;
        let resp: DataEnvelope<Map<String, Value>> = serde_json::from_str(&body)?;
        Ok(resp.data)
    }

    /// Fetch the given categories as a typed document. Categories the
    /// backend leaves out come back at their defaults.
    pub async fn get_document(
        &self,
        categories: &[ConfigCategory],
    ) -> Result<ConfigDocument, BackendError> {
        let keys: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
        let data = self.get_settings(&keys).await?;
        Ok(ConfigDocument::from_value(Value::Object(data))?)
    }

    /// Merge a fragment into the backend's in-memory configuration and
    /// (re)initialize the services it touches.
    pub async fn set_settings(&self, fragment: &ConfigFragment) -> Result<SetOutcome, BackendError> {
        let url = self.endpoint("settings/set")?;
        let body = self.post_json(url, fragment.body()).await?;
        let resp: DataEnvelope<Map<String, Value>> = serde_json::from_str(&body)?;
        Ok(SetOutcome::from_data(&resp.data))
    }

    /// Write the in-memory configuration to durable storage.
    pub async fn save_settings(&self) -> Result<(), BackendError> {
        let url = self.endpoint("settings/save")?;
        self.post_empty(url).await?;
        Ok(())
    }

    /// Replace the in-memory configuration with what is in storage.
    pub async fn load_settings(&self) -> Result<(), BackendError> {
        let url = self.endpoint("settings/load")?;
        self.get_text(url).await?;
        Ok(())
    }
}
