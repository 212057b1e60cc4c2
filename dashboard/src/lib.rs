//! Media dashboard server: settings apply protocol, readiness gate,
//! onboarding wizard and initialization poller.

pub mod app;
pub mod apply;
pub mod background;
pub mod config;
pub mod gate;
pub mod server;
pub mod shutdown;
pub mod wizard;

mod bootstrap;

pub use bootstrap::{data_dir, init_foundation, load_dotenv};
