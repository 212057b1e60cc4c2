//! Background task loops: backend initialization polling.

use std::time::Duration;

use backend_client::BackendClient;
use dashboard_db::Database;
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::app::SharedState;

pub(crate) async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The local flag was already set; the backend was not contacted.
    AlreadyInitialized,
    Initialized,
    Cancelled,
}

/// Polls backend health until it reports fully initialized, then sets the
/// local flag for good.
pub struct InitializationPoller {
    backend: BackendClient,
    db: Database,
    interval: Duration,
}

impl InitializationPoller {
    pub fn new(backend: BackendClient, db: Database, interval: Duration) -> Self {
        Self {
            backend,
            db,
            interval,
        }
    }

    pub async fn run(&self, token: &CancellationToken, initialized: &watch::Sender<bool>) -> PollOutcome {
        match self.db.is_initialized() {
            Ok(true) => {
                initialized.send_replace(true);
                return PollOutcome::AlreadyInitialized;
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("Failed to read initialization flag, polling anyway: {e}"),
        }

        loop {
            if token.is_cancelled() {
                return PollOutcome::Cancelled;
            }

            match self.backend.health().await {
                Ok(true) => {
                    if let Err(e) = self.db.mark_initialized() {
                        tracing::error!("Failed to persist initialization flag: {e}");
                    }
                    initialized.send_replace(true);
                    return PollOutcome::Initialized;
                }
                Ok(false) => tracing::debug!("Backend still initializing"),
                Err(e) => tracing::debug!("Health check failed: {e}"),
            }

            if sleep_or_cancel(token, self.interval).await {
                return PollOutcome::Cancelled;
            }
        }
    }
}

/// Poll until the backend is initialized or shutdown begins.
pub async fn initialization_poll_loop(state: SharedState) {
    let token = state.shutdown_token().clone();
    let outcome = state.poller().run(&token, state.initialized_sender()).await;
    match outcome {
        PollOutcome::AlreadyInitialized => tracing::debug!("Initialization poll skipped (already initialized)"),
        PollOutcome::Initialized => tracing::info!("Backend initialized, UI unblocked"),
        PollOutcome::Cancelled => tracing::info!("Initialization poll loop stopped (shutdown)"),
    }
}
