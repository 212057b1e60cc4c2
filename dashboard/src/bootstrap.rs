use std::path::PathBuf;

use dashboard_db::Database;

use crate::config::AppConfig;

/// Determine the data directory for the application.
/// Priority: DASHBOARD_DATA_DIR env var > ~/.media-dashboard
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DASHBOARD_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".media-dashboard")
}

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Foundation init (fatal on error): environment, data directory, local
/// state database, runtime config.
pub fn init_foundation() -> Result<(Database, AppConfig), anyhow::Error> {
    load_dotenv();
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let db_path = dir.join("local.db");
    tracing::info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let config = AppConfig::load();

    match db.initialized_at() {
        Ok(Some(at)) => tracing::info!("Backend initialization recorded at {at}"),
        Ok(None) => tracing::info!("Backend not yet initialized, health polling will run"),
        Err(e) => tracing::warn!("Failed to read initialization flag: {e}"),
    }

    tracing::info!(
        "Settings loaded (port={}, backend={})",
        config.server_port,
        config.backend_url
    );
    Ok((db, config))
}
