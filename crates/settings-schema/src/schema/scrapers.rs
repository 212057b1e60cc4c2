use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperSettings {
    /// Hours to wait before re-scraping after 2, 5 and 10 failed attempts.
    pub after_2: f64,
    pub after_5: f64,
    pub after_10: f64,
    pub torrentio: TorrentioSettings,
    pub knightcrawler: KnightcrawlerSettings,
    pub jackett: JackettSettings,
    pub prowlarr: ProwlarrSettings,
    pub orionoid: OrionoidSettings,
    pub mediafusion: MediafusionSettings,
    pub zilean: ZileanSettings,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            after_2: 2.0,
            after_5: 6.0,
            after_10: 24.0,
            torrentio: TorrentioSettings::default(),
            knightcrawler: KnightcrawlerSettings::default(),
            jackett: JackettSettings::default(),
            prowlarr: ProwlarrSettings::default(),
            orionoid: OrionoidSettings::default(),
            mediafusion: MediafusionSettings::default(),
            zilean: ZileanSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TorrentioSettings {
    pub enabled: bool,
    pub url: String,
    pub filter: String,
}

impl Default for TorrentioSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://torrentio.strem.fun".into(),
            filter: "sort=qualitysize%7Cqualityfilter=480p,scr,cam".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnightcrawlerSettings {
    pub enabled: bool,
    pub url: String,
}

impl Default for KnightcrawlerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "https://knightcrawler.elfhosted.com".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JackettSettings {
    pub enabled: bool,
    pub url: String,
    pub api_key: String,
}

impl Default for JackettSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://localhost:9117".into(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProwlarrSettings {
    pub enabled: bool,
    pub url: String,
    pub api_key: String,
}

impl Default for ProwlarrSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://localhost:9696".into(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrionoidSettings {
    pub enabled: bool,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediafusionSettings {
    pub enabled: bool,
    pub url: String,
}

impl Default for MediafusionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "https://mediafusion.elfhosted.com".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZileanSettings {
    pub enabled: bool,
    pub url: String,
}

impl Default for ZileanSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://localhost:8181".into(),
        }
    }
}
