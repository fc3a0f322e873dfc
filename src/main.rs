//! Pomodoro Timer - countdown timer session server
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::session_sweeper_task,
    timer::SystemClock,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, retention={}min",
          config.host, config.port, config.retention_minutes);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), Arc::new(SystemClock)));

    // Start the session sweeper background task
    match config.retention() {
        Some(retention) => {
            let sweeper_state = Arc::clone(&state);
            let every = config.sweep_interval();
            tokio::spawn(async move {
                session_sweeper_task(sweeper_state, every, retention).await;
            });
        }
        None => info!("Session retention disabled, sessions are kept until shutdown"),
    }

    // Create HTTP router with all endpoints
    let app = create_router(state, config.static_dir.as_deref());

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST  /api/v1/sessions     - Start a timer session");
    info!("  GET   /api/v1/sessions/:id - Read a session (?now_ms=)");
    info!("  PATCH /api/v1/sessions/:id - pause | resume | stop | skip");
    info!("  GET   /status              - Server status");
    info!("  GET   /health              - Health check");
    if let Some(dir) = &config.static_dir {
        info!("  GET   /*                   - Static files from {}", dir.display());
    }

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
