use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralSettings {
    pub debug: bool,
    pub log: bool,
    pub symlink: SymlinkSettings,
    pub downloaders: DownloaderSettings,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            log: true,
            symlink: SymlinkSettings::default(),
            downloaders: DownloaderSettings::default(),
        }
    }
}

/// Where the rclone mount lives and where the symlink library is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymlinkSettings {
    pub rclone_path: String,
    pub library_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloaderSettings {
    pub real_debrid: DebridSettings,
    pub all_debrid: DebridSettings,
    pub torbox: DebridSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebridSettings {
    pub enabled: bool,
    pub api_key: String,
}
