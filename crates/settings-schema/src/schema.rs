//! Per-category settings structures.
//!
//! Every struct is `#[serde(default, deny_unknown_fields)]`: absent keys take
//! their documented default and unexpected keys fail deserialization.

mod content;
mod general;
mod media_server;
mod scrapers;

pub use content::{ContentSettings, ListrrSettings, MdblistSettings, OverseerrSettings, PlexWatchlistSettings, TraktSettings};
pub use general::{DebridSettings, DownloaderSettings, GeneralSettings, SymlinkSettings};
pub use media_server::{MediaServerSettings, PlexSettings, UpdaterSettings};
pub use scrapers::{
    JackettSettings, KnightcrawlerSettings, MediafusionSettings, OrionoidSettings,
    ProwlarrSettings, ScraperSettings, TorrentioSettings, ZileanSettings,
};
