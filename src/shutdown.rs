use tracing::{info, warn};

/// Graceful shutdown coordinator for the counter service
pub struct ShutdownCoordinator {}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {}
    }

    /// Resolve once SIGINT (or SIGTERM on Unix) arrives
    pub async fn wait_for_shutdown(self) {
        info!("Shutdown coordinator ready - will shutdown gracefully on SIGINT/SIGTERM");

        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
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
            _ = ctrl_c => info!("Received SIGINT"),
            _ = terminate => info!("Received SIGTERM"),
        }
    }

    /// Perform graceful shutdown operations once the server has drained
    pub fn shutdown_all_services() {
        info!("Initiating graceful shutdown of all services...");

        crate::observability::run_metrics().log_stats();
        crate::telemetry::shutdown_telemetry();

        info!("Graceful shutdown completed successfully");
    }
}
