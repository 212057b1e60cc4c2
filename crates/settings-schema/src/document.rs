//! The backend's configuration document, one typed section per category.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TransformError;
use crate::catalog::ConfigCategory;
use crate::schema::{ContentSettings, GeneralSettings, MediaServerSettings, ScraperSettings};
use crate::transform::{PartialView, strip_nulls};

/// Full configuration tree. A missing category is equivalent to its defaults,
/// which leave every optional service disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigDocument {
    pub general: GeneralSettings,
    pub media_server: MediaServerSettings,
    pub content: ContentSettings,
    pub scrapers: ScraperSettings,
}

impl ConfigDocument {
    /// Parse the `data` object of a settings fetch.
    ///
    /// Fails with [`TransformError::SchemaDrift`] on any key outside the
    /// known key set, naming the first offending dotted path.
    pub fn from_value(value: Value) -> Result<Self, TransformError> {
        let Value::Object(object) = strip_nulls(value) else {
            return Err(TransformError::InvalidValue {
                key: "<document>".into(),
                message: "expected an object".into(),
            });
        };

        let mut document = Self::default();
        for (key, section) in object {
            let category: ConfigCategory = key
                .parse()
                .map_err(|_| TransformError::SchemaDrift { path: key.clone() })?;
            document.set(PartialView::from_value(category, section)?);
        }
        Ok(document)
    }

    pub fn view(&self, category: ConfigCategory) -> PartialView {
        match category {
            ConfigCategory::General => PartialView::General(self.general.clone()),
            ConfigCategory::MediaServer => PartialView::MediaServer(self.media_server.clone()),
            ConfigCategory::Content => PartialView::Content(self.content.clone()),
            ConfigCategory::Scrapers => PartialView::Scrapers(self.scrapers.clone()),
        }
    }

    /// Replace one category's section.
    pub fn set(&mut self, view: PartialView) {
        match view {
            PartialView::General(s) => self.general = s,
            PartialView::MediaServer(s) => self.media_server = s,
            PartialView::Content(s) => self.content = s,
            PartialView::Scrapers(s) => self.scrapers = s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_is_all_defaults() {
        let document = ConfigDocument::from_value(json!({})).unwrap();
        assert_eq!(document, ConfigDocument::default());
        assert!(!document.scrapers.jackett.enabled);
        assert!(!document.general.downloaders.real_debrid.enabled);
    }

    #[test]
    fn unknown_category_is_schema_drift() {
        let err = ConfigDocument::from_value(json!({ "notifications": {} })).unwrap_err();
        assert!(matches!(err, TransformError::SchemaDrift { path } if path == "notifications"));
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(ConfigDocument::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn sections_parse_into_typed_fields() {
        let document = ConfigDocument::from_value(json!({
            "general": { "symlink": { "library_path": "/mnt/library" } },
            "content": { "overseerr": { "enabled": true, "api_key": "k" } },
            "scrapers": null,
        }))
        .unwrap();

        assert_eq!(document.general.symlink.library_path, "/mnt/library");
        assert!(document.content.overseerr.enabled);
        assert_eq!(document.content.overseerr.url, "http://localhost:5055");
        assert_eq!(document.scrapers, ScraperSettings::default());
    }
}
