use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentSettings {
    pub overseerr: OverseerrSettings,
    pub plex_watchlist: PlexWatchlistSettings,
    pub mdblist: MdblistSettings,
    pub listrr: ListrrSettings,
    pub trakt: TraktSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverseerrSettings {
    pub enabled: bool,
    pub url: String,
    pub api_key: String,
}

impl Default for OverseerrSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://localhost:5055".into(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlexWatchlistSettings {
    pub enabled: bool,
    pub rss: Vec<String>,
    pub update_interval: u64,
}

impl Default for PlexWatchlistSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            rss: Vec::new(),
            update_interval: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MdblistSettings {
    pub enabled: bool,
    pub api_key: String,
    pub lists: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListrrSettings {
    pub enabled: bool,
    pub api_key: String,
    pub movie_lists: Vec<String>,
    pub show_lists: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraktSettings {
    pub enabled: bool,
    pub api_key: String,
    pub watchlist: Vec<String>,
}
