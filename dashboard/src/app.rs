use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use backend_client::{BackendClient, BackendError};
use dashboard_db::Database;
use settings_schema::ConfigCategory;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::apply::SettingsCoordinator;
use crate::background::InitializationPoller;
use crate::config::AppConfig;
use crate::wizard::WizardController;

/// Application shared state accessible from axum handlers and background tasks.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    backend: BackendClient,
    db: Database,
    /// Cancelled once on shutdown; observed by the poller and the server
    shutdown_token: CancellationToken,
    /// Local initialized flag, published by the poller
    initialized: watch::Sender<bool>,
    /// Categories with an apply in flight
    applying: Mutex<HashSet<ConfigCategory>>,
}

impl SharedState {
    /// Create shared state from an already-opened database and loaded config.
    pub fn new(db: Database, config: AppConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend_url, config.request_timeout)?;
        let initialized = db.is_initialized().unwrap_or_else(|e| {
            tracing::warn!("Failed to read initialization flag: {e}");
            false
        });
        let (initialized, _) = watch::channel(initialized);

        Ok(Self {
            inner: Arc::new(SharedStateInner {
                config,
                backend,
                db,
                shutdown_token: CancellationToken::new(),
                initialized,
                applying: Mutex::new(HashSet::new()),
            }),
        })
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }

    pub fn coordinator(&self) -> SettingsCoordinator {
        SettingsCoordinator::new(self.inner.backend.clone(), self.inner.config.verify_round_trip)
    }

    pub fn wizard(&self) -> WizardController {
        WizardController::new(self.inner.db.clone(), self.inner.backend.clone(), self.coordinator())
    }

    pub fn poller(&self) -> InitializationPoller {
        InitializationPoller::new(
            self.inner.backend.clone(),
            self.inner.db.clone(),
            self.inner.config.health_interval,
        )
    }

    /// Whether the backend has been seen fully initialized.
    pub fn is_initialized(&self) -> bool {
        *self.inner.initialized.borrow()
    }

    pub fn initialized_sender(&self) -> &watch::Sender<bool> {
        &self.inner.initialized
    }

    /// Claim `category` for one apply. `None` when another apply of the same
    /// category has not returned yet.
    pub fn begin_apply(&self, category: ConfigCategory) -> Option<ApplyGuard> {
        let mut applying = self
            .inner
            .applying
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if !applying.insert(category) {
            return None;
        }
        Some(ApplyGuard {
            state: self.clone(),
            category,
        })
    }
}

/// Releases the category claimed by [`SharedState::begin_apply`] on drop.
pub struct ApplyGuard {
    state: SharedState,
    category: ConfigCategory,
}

impl Drop for ApplyGuard {
    fn drop(&mut self) {
        let mut applying = self
            .state
            .inner
            .applying
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        applying.remove(&self.category);
    }
}

#[cfg(test)]
pub(crate) fn test_state(backend_url: &str, initialized: bool) -> SharedState {
    let db = Database::open_in_memory().unwrap();
    if initialized {
        db.mark_initialized().unwrap();
    }
    let config = AppConfig {
        backend_url: backend_url.to_string(),
        request_timeout: std::time::Duration::from_secs(5),
        health_interval: std::time::Duration::from_millis(20),
        ..AppConfig::default()
    };
    SharedState::new(db, config).unwrap()
}
