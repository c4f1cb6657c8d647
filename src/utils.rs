//! Utility functions.

use tracing::{info, warn};

/// Resolve when the process receives Ctrl+C or SIGTERM.
///
/// Handler installation failures are logged and that signal source is
/// ignored, so the server keeps running instead of shutting down at once.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C: closing HTTP server");
        }
        _ = terminate => {
            info!("SIGTERM signal received: closing HTTP server");
        }
    }
}
