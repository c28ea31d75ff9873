//! HTTP server startup and shutdown

use tokio::net::TcpListener;

use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            state: ServerState::new(config),
        }
    }

    /// Create server with existing state (for sharing with oneshot)
    pub fn with_state(state: ServerState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Serve until Ctrl-C or SIGTERM
    pub async fn run(&self) -> Result<()> {
        let addr = self.state.config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!(
            %addr,
            input_policy = %self.state.input_policy(),
            environment = %self.state.config.environment,
            "Billing server listening"
        );

        axum::serve(listener, self.state.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Billing server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}
