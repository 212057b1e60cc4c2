//! Static service catalog shared by every component.
//!
//! One row per [`ServiceName`]: owning category, display label, how an
//! apply decides whether the service is affected, and which readiness
//! checks require it. The gate's requirement and the wizard's per-step
//! requirements are both derived from this table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TransformError;

/// A partition of the configuration document edited as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigCategory {
    General,
    MediaServer,
    Content,
    Scrapers,
}

impl ConfigCategory {
    pub const ALL: [ConfigCategory; 4] = [
        ConfigCategory::General,
        ConfigCategory::MediaServer,
        ConfigCategory::Content,
        ConfigCategory::Scrapers,
    ];

    /// Top-level key of this category in the backend document.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigCategory::General => "general",
            ConfigCategory::MediaServer => "media_server",
            ConfigCategory::Content => "content",
            ConfigCategory::Scrapers => "scrapers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfigCategory::General => "General",
            ConfigCategory::MediaServer => "Media server",
            ConfigCategory::Content => "Content",
            ConfigCategory::Scrapers => "Scrapers",
        }
    }

    /// Catalog rows owned by this category.
    pub fn services(self) -> impl Iterator<Item = &'static ServiceEntry> {
        CATALOG.iter().filter(move |e| e.category == self)
    }
}

impl fmt::Display for ConfigCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigCategory {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TransformError::UnknownCategory(s.to_string()))
    }
}

/// Identifier of one configurable backend capability.
///
/// Variant order matches [`CATALOG`] row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceName {
    #[serde(rename = "core")]
    Core,
    #[serde(rename = "symlink")]
    Symlink,
    #[serde(rename = "symlinklibrary")]
    SymlinkLibrary,
    #[serde(rename = "realdebrid")]
    RealDebrid,
    #[serde(rename = "alldebrid")]
    AllDebrid,
    #[serde(rename = "torbox")]
    Torbox,
    #[serde(rename = "plexlibrary")]
    PlexLibrary,
    #[serde(rename = "plexupdater")]
    PlexUpdater,
    #[serde(rename = "jellyfinupdater")]
    JellyfinUpdater,
    #[serde(rename = "embyupdater")]
    EmbyUpdater,
    #[serde(rename = "overseerr")]
    Overseerr,
    #[serde(rename = "plex_watchlist")]
    PlexWatchlist,
    #[serde(rename = "mdblist")]
    Mdblist,
    #[serde(rename = "listrr")]
    Listrr,
    #[serde(rename = "trakt")]
    Trakt,
    #[serde(rename = "scraping")]
    Scraping,
    #[serde(rename = "torrentio")]
    Torrentio,
    #[serde(rename = "knightcrawler")]
    Knightcrawler,
    #[serde(rename = "jackett")]
    Jackett,
    #[serde(rename = "prowlarr")]
    Prowlarr,
    #[serde(rename = "orionoid")]
    Orionoid,
    #[serde(rename = "mediafusion")]
    Mediafusion,
    #[serde(rename = "zilean")]
    Zilean,
}

impl ServiceName {
    pub fn entry(self) -> &'static ServiceEntry {
        &CATALOG[self as usize]
    }

    /// Wire name used by the backend.
    pub fn as_str(self) -> &'static str {
        self.entry().wire
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn category(self) -> ConfigCategory {
        self.entry().category
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|e| e.wire == s)
            .map(|e| e.service)
            .ok_or_else(|| TransformError::UnknownService(s.to_string()))
    }
}

/// When an apply of the owning category expects this service to (re)initialize.
///
/// Applying a whole view treats [`Activation::Section`] like
/// [`Activation::Always`]. Applying changes against a base only expects
/// `Section` and `Toggle` services whose section has a changed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Every apply of the category touches the service.
    Always,
    /// Only when a key under this category-relative dotted prefix changes.
    Section(&'static str),
    /// Only when the boolean at this category-relative dotted key is `true`.
    Toggle(&'static str),
}

/// One catalog row.
#[derive(Debug, Clone, Copy)]
pub struct ServiceEntry {
    pub service: ServiceName,
    pub wire: &'static str,
    pub category: ConfigCategory,
    pub label: &'static str,
    pub activation: Activation,
    /// Must be initialized before the wizard moves past this category's step.
    pub step_required: bool,
    /// Must be initialized before the main application is reachable.
    pub gate_required: bool,
}

const fn row(
    service: ServiceName,
    wire: &'static str,
    category: ConfigCategory,
    label: &'static str,
    activation: Activation,
    step_required: bool,
    gate_required: bool,
) -> ServiceEntry {
    ServiceEntry {
        service,
        wire,
        category,
        label,
        activation,
        step_required,
        gate_required,
    }
}

use Activation::{Always, Section, Toggle};
use ConfigCategory::{Content, General, MediaServer, Scrapers};

pub static CATALOG: &[ServiceEntry] = &[
    row(ServiceName::Core, "core", General, "Core", Always, false, false),
    row(ServiceName::Symlink, "symlink", General, "Symlinker", Section("symlink"), true, true),
    row(ServiceName::SymlinkLibrary, "symlinklibrary", General, "Symlink library", Section("symlink"), true, true),
    row(ServiceName::RealDebrid, "realdebrid", General, "Real-Debrid", Toggle("downloaders.real_debrid.enabled"), false, false),
    row(ServiceName::AllDebrid, "alldebrid", General, "AllDebrid", Toggle("downloaders.all_debrid.enabled"), false, false),
    row(ServiceName::Torbox, "torbox", General, "TorBox", Toggle("downloaders.torbox.enabled"), false, false),
    row(ServiceName::PlexLibrary, "plexlibrary", MediaServer, "Plex library", Always, true, false),
    row(ServiceName::PlexUpdater, "plexupdater", MediaServer, "Plex updater", Always, false, false),
    row(ServiceName::JellyfinUpdater, "jellyfinupdater", MediaServer, "Jellyfin updater", Toggle("jellyfin.enabled"), false, false),
    row(ServiceName::EmbyUpdater, "embyupdater", MediaServer, "Emby updater", Toggle("emby.enabled"), false, false),
    row(ServiceName::Overseerr, "overseerr", Content, "Overseerr", Toggle("overseerr.enabled"), false, false),
    row(ServiceName::PlexWatchlist, "plex_watchlist", Content, "Plex watchlist", Toggle("plex_watchlist.enabled"), false, false),
    row(ServiceName::Mdblist, "mdblist", Content, "MDBList", Toggle("mdblist.enabled"), false, false),
    row(ServiceName::Listrr, "listrr", Content, "Listrr", Toggle("listrr.enabled"), false, false),
    row(ServiceName::Trakt, "trakt", Content, "Trakt", Toggle("trakt.enabled"), false, false),
    row(ServiceName::Scraping, "scraping", Scrapers, "Scraping", Always, true, false),
    row(ServiceName::Torrentio, "torrentio", Scrapers, "Torrentio", Toggle("torrentio.enabled"), false, false),
    row(ServiceName::Knightcrawler, "knightcrawler", Scrapers, "Knightcrawler", Toggle("knightcrawler.enabled"), false, false),
    row(ServiceName::Jackett, "jackett", Scrapers, "Jackett", Toggle("jackett.enabled"), false, false),
    row(ServiceName::Prowlarr, "prowlarr", Scrapers, "Prowlarr", Toggle("prowlarr.enabled"), false, false),
    row(ServiceName::Orionoid, "orionoid", Scrapers, "Orionoid", Toggle("orionoid.enabled"), false, false),
    row(ServiceName::Mediafusion, "mediafusion", Scrapers, "MediaFusion", Toggle("mediafusion.enabled"), false, false),
    row(ServiceName::Zilean, "zilean", Scrapers, "Zilean", Toggle("zilean.enabled"), false, false),
];
