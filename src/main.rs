//! Pomodoro Server - A state-managed HTTP server driving a Pomodoro countdown
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    api::create_router,
    config::Config,
    state::{AppState, TimerAction},
    tasks::session_monitor_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, autostart={}",
          config.host, config.port, config.tick_millis, config.autostart);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.tick_interval()));

    // Log session changes in the background
    tokio::spawn(session_monitor_task(state.subscribe()));

    if config.autostart {
        state.dispatch(TimerAction::Start)?;
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start         - Start the countdown");
    info!("  POST /pause         - Pause the countdown");
    info!("  POST /toggle        - Start or pause");
    info!("  POST /reset         - Reset the current session");
    info!("  POST /tick          - Decrement by one second");
    info!("  POST /action/:name  - Dispatch an action by name");
    info!("  GET  /status        - Current timer and server status");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown()?;
    info!("Server shutdown complete");
    Ok(())
}
