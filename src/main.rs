// Hero drafter entry point.
//
// Startup sequence:
// 1. Load config (the log directory comes from it)
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the HTTP client for the draft authority
// 4. Create mpsc channels
// 5. Spawn the app orchestrator task (it triggers the initial roster load)
// 6. Run the TUI event loop (blocking until the user quits)
// 7. Cleanup on exit

use hero_drafter::app;
use hero_drafter::config;
use hero_drafter::net::HttpAuthority;
use hero_drafter::tui;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config first; the log directory comes from it.
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.log.dir)?;
    info!(
        "Hero drafter starting up: authority at {}, {} pick / {} ban slots per team",
        config.server.base_url, config.draft.pick_slots, config.draft.ban_slots
    );

    // 3. Build the authority client
    let authority = Arc::new(HttpAuthority::new(&config.server.base_url));

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (net_tx, net_rx) = mpsc::channel(64);

    // 5. Spawn the app orchestrator task
    let state = app::AppState::new(config, authority, net_tx, ui_tx);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(state, cmd_rx, net_rx).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI event loop (blocking until the user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for the app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Hero drafter shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI).
fn init_tracing(log_dir: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::path::Path::new(log_dir);
    std::fs::create_dir_all(log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("hero-drafter.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hero_drafter=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
