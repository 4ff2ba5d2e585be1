//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api::build_app;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn new(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Bind the configured port and serve until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        tracing::info!("Kiln album server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        serve(listener, state, shutdown).await
    }
}

/// Serve the album API on an already bound listener
///
/// Tests bind `127.0.0.1:0` and pass their own shutdown future.
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Internal(e.into()))
}
