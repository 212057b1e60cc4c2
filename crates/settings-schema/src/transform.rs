//! Mapping between the backend document and the narrow view one form edits.
//!
//! Forms work with flat category-relative dotted keys (`symlink.library_path`);
//! the backend works with nested objects under the category key. Both
//! directions are total over the fixed key set of a category and reject
//! anything outside it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::TransformError;
use crate::catalog::{Activation, ConfigCategory, ServiceName};
use crate::document::ConfigDocument;
use crate::schema::{ContentSettings, GeneralSettings, MediaServerSettings, ScraperSettings};

/// Flat dotted-key view of one category, keyed relative to the category.
pub type FieldMap = BTreeMap<String, Value>;

/// Default field values per category; its key sets are the known key sets.
static KNOWN_FIELDS: LazyLock<BTreeMap<ConfigCategory, FieldMap>> = LazyLock::new(|| {
    ConfigCategory::ALL
        .into_iter()
        .map(|category| {
            let mut fields = FieldMap::new();
            if let Ok(value) = PartialView::defaults(category).to_value() {
                flatten_into("", &value, &mut fields);
            }
            (category, fields)
        })
        .collect()
});

/// The subset of the document one settings form edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", content = "settings", rename_all = "snake_case")]
pub enum PartialView {
    General(GeneralSettings),
    MediaServer(MediaServerSettings),
    Content(ContentSettings),
    Scrapers(ScraperSettings),
}

impl PartialView {
    /// View with every key at its documented default.
    pub fn defaults(category: ConfigCategory) -> Self {
        match category {
            ConfigCategory::General => PartialView::General(GeneralSettings::default()),
            ConfigCategory::MediaServer => PartialView::MediaServer(MediaServerSettings::default()),
            ConfigCategory::Content => PartialView::Content(ContentSettings::default()),
            ConfigCategory::Scrapers => PartialView::Scrapers(ScraperSettings::default()),
        }
    }

    pub fn category(&self) -> ConfigCategory {
        match self {
            PartialView::General(_) => ConfigCategory::General,
            PartialView::MediaServer(_) => ConfigCategory::MediaServer,
            PartialView::Content(_) => ConfigCategory::Content,
            PartialView::Scrapers(_) => ConfigCategory::Scrapers,
        }
    }

    /// Nested JSON object of this category's settings.
    pub fn to_value(&self) -> Result<Value, TransformError> {
        let value = match self {
            PartialView::General(s) => serde_json::to_value(s)?,
            PartialView::MediaServer(s) => serde_json::to_value(s)?,
            PartialView::Content(s) => serde_json::to_value(s)?,
            PartialView::Scrapers(s) => serde_json::to_value(s)?,
        };
        Ok(value)
    }

    /// Flatten for display. Every known key is present.
    pub fn fields(&self) -> Result<FieldMap, TransformError> {
        let mut fields = FieldMap::new();
        flatten_into("", &self.to_value()?, &mut fields);
        Ok(fields)
    }

    /// Parse a nested category object. Absent or `null` keys take defaults.
    pub fn from_value(category: ConfigCategory, value: Value) -> Result<Self, TransformError> {
        let value = strip_nulls(value);
        if !value.is_object() {
            return Err(TransformError::InvalidValue {
                key: category.as_str().to_string(),
                message: "expected an object".into(),
            });
        }

        let mut incoming = FieldMap::new();
        flatten_into("", &value, &mut incoming);
        check_known_keys(category, incoming.keys())?;

        let invalid = |e: serde_json::Error| TransformError::InvalidValue {
            key: category.as_str().to_string(),
            message: e.to_string(),
        };
        let view = match category {
            ConfigCategory::General => PartialView::General(serde_json::from_value(value).map_err(invalid)?),
            ConfigCategory::MediaServer => {
                PartialView::MediaServer(serde_json::from_value(value).map_err(invalid)?)
            }
            ConfigCategory::Content => PartialView::Content(serde_json::from_value(value).map_err(invalid)?),
            ConfigCategory::Scrapers => PartialView::Scrapers(serde_json::from_value(value).map_err(invalid)?),
        };
        Ok(view)
    }

    /// Rebuild a view from a flat form submission.
    pub fn from_fields(category: ConfigCategory, fields: &FieldMap) -> Result<Self, TransformError> {
        check_known_keys(category, fields.keys())?;
        let nested = unflatten(category, fields)?;
        Self::from_value(category, nested)
    }

    /// Overlay a partial flat form onto this view. Keys the form leaves out
    /// keep their current values; a `null` resets a key to its default.
    pub fn with_fields(&self, submitted: &FieldMap) -> Result<Self, TransformError> {
        let category = self.category();
        check_known_keys(category, submitted.keys())?;
        let mut fields = self.fields()?;
        fields.extend(submitted.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self::from_fields(category, &fields)
    }

    /// Services an apply of this whole view expects to (re)initialize.
    pub fn affected_services(&self) -> Vec<ServiceName> {
        let value = self.to_value().ok();
        self.category()
            .services()
            .filter(|entry| match entry.activation {
                Activation::Always | Activation::Section(_) => true,
                Activation::Toggle(key) => toggle_on(value.as_ref(), key),
            })
            .map(|entry| entry.service)
            .collect()
    }

    /// Services an apply of the changes from `base` to this view expects to
    /// (re)initialize. Sectioned and toggled services count only when a key
    /// in their section changed.
    pub fn affected_by_changes(&self, base: &PartialView) -> Result<Vec<ServiceName>, TransformError> {
        let changed = diff_fields(self, base)?;
        let touched = |section: &str| {
            let prefix = format!("{section}.");
            changed.iter().any(|key| key.starts_with(&prefix))
        };
        let value = self.to_value()?;

        Ok(self
            .category()
            .services()
            .filter(|entry| match entry.activation {
                Activation::Always => true,
                Activation::Section(section) => touched(section),
                Activation::Toggle(key) => {
                    let section_touched = match key.rsplit_once('.') {
                        Some((section, _)) => touched(section),
                        None => !changed.is_empty(),
                    };
                    section_touched && toggle_on(Some(&value), key)
                }
            })
            .map(|entry| entry.service)
            .collect())
    }
}

/// Minimal nested fragment submitted for one category: `{ <category>: {...} }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFragment {
    view: PartialView,
    body: Value,
}

impl ConfigFragment {
    pub fn category(&self) -> ConfigCategory {
        self.view.category()
    }

    /// The view this fragment was rebuilt from.
    pub fn view(&self) -> &PartialView {
        &self.view
    }

    /// Request body for the backend's mutation endpoint.
    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// Category-relative dotted keys a category's form needs.
pub fn known_keys(category: ConfigCategory) -> Vec<&'static str> {
    KNOWN_FIELDS
        .get(&category)
        .map(|fields| fields.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Extract-for-display: the category's view, defaults filled in.
pub fn extract(document: &ConfigDocument, category: ConfigCategory) -> PartialView {
    document.view(category)
}

/// Rebuild-for-submission.
pub fn rebuild(view: &PartialView) -> Result<ConfigFragment, TransformError> {
    let mut body = Map::new();
    body.insert(view.category().as_str().to_string(), view.to_value()?);
    Ok(ConfigFragment {
        view: view.clone(),
        body: Value::Object(body),
    })
}

/// Rebuild only what changed from `base` to `view`: `{ <category>: {changed keys} }`.
/// The fragment keeps `view` as the effective result of the apply.
pub fn rebuild_changes(base: &PartialView, view: &PartialView) -> Result<ConfigFragment, TransformError> {
    let category = view.category();
    let mut fields = view.fields()?;
    let changed = diff_fields(view, base)?;
    fields.retain(|key, _| changed.contains(key));

    let mut body = Map::new();
    body.insert(category.as_str().to_string(), unflatten(category, &fields)?);
    Ok(ConfigFragment {
        view: view.clone(),
        body: Value::Object(body),
    })
}

/// Dotted keys whose values differ between two views of the same category.
pub fn diff_fields(expected: &PartialView, actual: &PartialView) -> Result<Vec<String>, TransformError> {
    let expected_fields = expected.fields()?;
    if expected.category() != actual.category() {
        return Ok(expected_fields.into_keys().collect());
    }
    let actual_fields = actual.fields()?;
    Ok(expected_fields
        .into_iter()
        .filter(|(key, value)| actual_fields.get(key) != Some(value))
        .map(|(key, _)| key)
        .collect())
}

fn check_known_keys<'a>(
    category: ConfigCategory,
    keys: impl Iterator<Item = &'a String>,
) -> Result<(), TransformError> {
    let Some(known) = KNOWN_FIELDS.get(&category) else {
        return Err(TransformError::UnknownCategory(category.as_str().to_string()));
    };
    for key in keys {
        if known.contains_key(key) {
            continue;
        }
        let qualified = format!("{category}.{key}");
        let nested_prefix = format!("{key}.");
        if known.keys().any(|k| k.starts_with(&nested_prefix)) {
            return Err(TransformError::InvalidValue {
                key: qualified,
                message: "expected an object".into(),
            });
        }
        return Err(TransformError::SchemaDrift { path: qualified });
    }
    Ok(())
}

pub(crate) fn flatten_into(prefix: &str, value: &Value, out: &mut FieldMap) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&path, child, out);
            }
        }
        leaf => {
            out.insert(prefix.to_string(), leaf.clone());
        }
    }
}

fn unflatten(category: ConfigCategory, fields: &FieldMap) -> Result<Value, TransformError> {
    let mut root = Map::new();
    for (key, value) in fields {
        let mut parts = key.split('.').peekable();
        let mut cursor = &mut root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                cursor.insert(part.to_string(), value.clone());
                break;
            }
            let entry = cursor
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            cursor = match entry {
                Value::Object(map) => map,
                _ => {
                    return Err(TransformError::InvalidValue {
                        key: format!("{category}.{key}"),
                        message: "conflicts with a value at a shorter key".into(),
                    });
                }
            };
        }
    }
    Ok(Value::Object(root))
}

pub(crate) fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}

fn toggle_on(value: Option<&Value>, key: &str) -> bool {
    value
        .and_then(|v| lookup(v, key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn lookup<'a>(value: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted.split('.').try_fold(value, |v, part| v.get(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[test]
    fn extract_fills_defaults_for_missing_category() {
        let document = ConfigDocument::from_value(json!({ "general": { "debug": true } })).unwrap();
        let view = extract(&document, ConfigCategory::Scrapers);
        assert_eq!(view, PartialView::defaults(ConfigCategory::Scrapers));

        let general = extract(&document, ConfigCategory::General).fields().unwrap();
        assert_eq!(general["debug"], json!(true));
        assert_eq!(general["log"], json!(true));
        assert_eq!(general["symlink.library_path"], json!(""));
    }

    #[test]
    fn fields_cover_exactly_the_known_keys() {
        for category in ConfigCategory::ALL {
            let view = PartialView::defaults(category);
            let keys: Vec<String> = view.fields().unwrap().into_keys().collect();
            let known: Vec<String> = known_keys(category).into_iter().map(String::from).collect();
            assert_eq!(keys, known, "{category}");
            assert!(keys.iter().all(|k| !k.is_empty()));
        }
    }

    #[test]
    fn from_value_rejects_unexpected_key() {
        let err = PartialView::from_value(
            ConfigCategory::Scrapers,
            json!({ "jackett": { "enabled": true, "apikey": "x" } }),
        )
        .unwrap_err();
        assert!(
            matches!(&err, TransformError::SchemaDrift { path } if path == "scrapers.jackett.apikey"),
            "{err}"
        );
    }

    #[test]
    fn from_value_treats_null_as_absent() {
        let view = PartialView::from_value(
            ConfigCategory::MediaServer,
            json!({ "plex": { "url": null, "token": "abc" }, "update_interval": null }),
        )
        .unwrap();
        let fields = view.fields().unwrap();
        assert_eq!(fields["plex.url"], json!("http://localhost:32400"));
        assert_eq!(fields["plex.token"], json!("abc"));
        assert_eq!(fields["update_interval"], json!(120));
    }

    #[test]
    fn from_value_reports_type_mismatch() {
        let err = PartialView::from_value(ConfigCategory::General, json!({ "debug": "yes" }))
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { key, .. } if key == "general"));
    }

    #[test]
    fn leaf_where_object_expected_is_invalid_not_drift() {
        let err = PartialView::from_value(ConfigCategory::General, json!({ "symlink": "/mnt" }))
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { key, .. } if key == "general.symlink"));
    }

    #[test]
    fn from_fields_rebuilds_nested_fragment() {
        let view = PartialView::from_fields(
            ConfigCategory::Scrapers,
            &fields(json!({ "jackett.enabled": true, "jackett.url": "bad" })),
        )
        .unwrap();
        let fragment = rebuild(&view).unwrap();

        assert_eq!(fragment.category(), ConfigCategory::Scrapers);
        let jackett = &fragment.body()["scrapers"]["jackett"];
        assert_eq!(jackett["enabled"], json!(true));
        assert_eq!(jackett["url"], json!("bad"));
        assert_eq!(jackett["api_key"], json!(""));
        assert_eq!(fragment.body()["scrapers"]["after_10"], json!(24.0));
        assert_eq!(fragment.body().as_object().unwrap().len(), 1);
    }

    #[test]
    fn from_fields_rejects_unknown_dotted_key() {
        let err = PartialView::from_fields(
            ConfigCategory::General,
            &fields(json!({ "symlink.cache_path": "/tmp" })),
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::SchemaDrift { path } if path == "general.symlink.cache_path"));
    }

    #[test]
    fn fields_round_trip_through_from_fields() {
        let mut view = ScraperSettings::default();
        view.torrentio.enabled = true;
        view.after_5 = 8.5;
        let view = PartialView::Scrapers(view);

        let rebuilt = PartialView::from_fields(ConfigCategory::Scrapers, &view.fields().unwrap()).unwrap();
        assert_eq!(rebuilt, view);
    }

    #[test]
    fn affected_services_include_always_and_enabled_toggles() {
        let general = PartialView::defaults(ConfigCategory::General);
        assert_eq!(
            general.affected_services(),
            vec![ServiceName::Core, ServiceName::Symlink, ServiceName::SymlinkLibrary]
        );

        let mut scrapers = ScraperSettings::default();
        scrapers.jackett.enabled = true;
        assert_eq!(
            PartialView::Scrapers(scrapers).affected_services(),
            vec![ServiceName::Scraping, ServiceName::Jackett]
        );

        assert!(PartialView::defaults(ConfigCategory::Content).affected_services().is_empty());
    }

    fn configured_general() -> PartialView {
        let mut general = GeneralSettings::default();
        general.symlink.library_path = "/mnt/library".into();
        general.symlink.rclone_path = "/mnt/remote".into();
        general.downloaders.real_debrid.enabled = true;
        general.downloaders.real_debrid.api_key = "rd-key".into();
        PartialView::General(general)
    }

    #[test]
    fn with_fields_keeps_keys_the_form_leaves_out() {
        let current = configured_general();
        let updated = current.with_fields(&fields(json!({ "debug": true }))).unwrap();

        let updated_fields = updated.fields().unwrap();
        assert_eq!(updated_fields["debug"], json!(true));
        assert_eq!(updated_fields["symlink.library_path"], json!("/mnt/library"));
        assert_eq!(updated_fields["downloaders.real_debrid.enabled"], json!(true));
        assert_eq!(updated_fields["downloaders.real_debrid.api_key"], json!("rd-key"));

        let err = current.with_fields(&fields(json!({ "symlink.cache": "/tmp" }))).unwrap_err();
        assert!(matches!(err, TransformError::SchemaDrift { .. }));
    }

    #[test]
    fn rebuild_changes_submits_only_changed_keys() {
        let base = configured_general();
        let view = base.with_fields(&fields(json!({ "debug": true }))).unwrap();
        let fragment = rebuild_changes(&base, &view).unwrap();

        assert_eq!(fragment.body(), &json!({ "general": { "debug": true } }));
        assert_eq!(fragment.view(), &view);

        let unchanged = rebuild_changes(&base, &base).unwrap();
        assert_eq!(unchanged.body(), &json!({ "general": {} }));
    }

    #[test]
    fn affected_by_changes_follows_touched_sections() {
        let base = configured_general();

        let debug = base.with_fields(&fields(json!({ "debug": true }))).unwrap();
        assert_eq!(debug.affected_by_changes(&base).unwrap(), vec![ServiceName::Core]);

        let symlink = base
            .with_fields(&fields(json!({ "symlink.library_path": "/mnt/other" })))
            .unwrap();
        assert_eq!(
            symlink.affected_by_changes(&base).unwrap(),
            vec![ServiceName::Core, ServiceName::Symlink, ServiceName::SymlinkLibrary]
        );

        let rotated = base
            .with_fields(&fields(json!({ "downloaders.real_debrid.api_key": "new" })))
            .unwrap();
        assert_eq!(
            rotated.affected_by_changes(&base).unwrap(),
            vec![ServiceName::Core, ServiceName::RealDebrid]
        );

        let scrapers = PartialView::defaults(ConfigCategory::Scrapers);
        let jackett = scrapers
            .with_fields(&fields(json!({ "jackett.enabled": true })))
            .unwrap();
        assert_eq!(
            jackett.affected_by_changes(&scrapers).unwrap(),
            vec![ServiceName::Scraping, ServiceName::Jackett]
        );
    }

    #[test]
    fn every_toggle_points_at_a_boolean_field() {
        for entry in CATALOG {
            if let Activation::Toggle(key) = entry.activation {
                let defaults = KNOWN_FIELDS.get(&entry.category).unwrap();
                assert_eq!(defaults.get(key), Some(&json!(false)), "{}", entry.wire);
            }
        }
    }

    #[test]
    fn diff_fields_lists_changed_keys() {
        let mut submitted = GeneralSettings::default();
        submitted.debug = true;
        submitted.symlink.library_path = "/mnt/library".into();
        let mut reloaded = submitted.clone();
        reloaded.symlink.library_path = "/mnt/library/".into();

        let diff = diff_fields(&PartialView::General(submitted.clone()), &PartialView::General(reloaded)).unwrap();
        assert_eq!(diff, vec!["symlink.library_path".to_string()]);

        let same = diff_fields(&PartialView::General(submitted.clone()), &PartialView::General(submitted)).unwrap();
        assert!(same.is_empty());
    }
}
