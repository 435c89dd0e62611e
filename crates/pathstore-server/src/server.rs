use std::future::Future;
use std::sync::Arc;

use pathstore_store::PathStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// Pathstore HTTP server.
pub struct PathServer {
    config: ServerConfig,
    state: AppState,
}

impl PathServer {
    pub fn new(config: ServerConfig, store: Arc<dyn PathStore>) -> Self {
        Self {
            config,
            state: AppState::new(store),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), self.config.max_body_size)
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests.
    ///
    /// When this returns, the server holds no more references to the store.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("pathstore listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("pathstore server stopped");
        Ok(())
    }
}
