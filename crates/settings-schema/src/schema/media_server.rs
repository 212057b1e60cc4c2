use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaServerSettings {
    /// Seconds between library update passes.
    pub update_interval: u64,
    pub plex: PlexSettings,
    pub jellyfin: UpdaterSettings,
    pub emby: UpdaterSettings,
}

impl Default for MediaServerSettings {
    fn default() -> Self {
        Self {
            update_interval: 120,
            plex: PlexSettings::default(),
            jellyfin: UpdaterSettings::default(),
            emby: UpdaterSettings::default(),
        }
    }
}

/// Plex is the primary library and is always configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlexSettings {
    pub url: String,
    pub token: String,
}

impl Default for PlexSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:32400".into(),
            token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterSettings {
    pub enabled: bool,
    pub url: String,
    pub api_key: String,
}
