//! Dashboard server binary.
//!
//! Starts the axum web server, the initialization poller, and signal handling.

use tracing_subscriber::EnvFilter;

use media_dashboard::app::SharedState;
use media_dashboard::background;
use media_dashboard::server;
use media_dashboard::shutdown;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting media dashboard");

    let (db, config) = media_dashboard::init_foundation()?;
    let state = SharedState::new(db, config)?;

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let s = state.clone();
    tokio::spawn(async move { background::initialization_poll_loop(s).await });

    tracing::info!(
        port = state.server_port(),
        "Dashboard server running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    shutdown::graceful_shutdown(&state).await;

    if let Err(e) = server_handle.await {
        tracing::warn!("Server task ended abnormally: {e}");
    }
    Ok(())
}
