//! HTTP API Server

use std::future::Future;
use std::sync::Arc;

use axum::http::Method;
use eyre::{Context, Result};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::handlers::AppState;
use super::routes::create_router;
use crate::config::Config;
use crate::store::CollectionStore;

/// HTTP API server
pub struct HttpServer {
    config: Config,
    store: Arc<CollectionStore>,
}

impl HttpServer {
    pub fn new(config: Config, store: Arc<CollectionStore>) -> Self {
        Self { config, store }
    }

    /// Router with CORS and request tracing applied per config
    pub fn app(&self) -> axum::Router {
        let mut app = create_router(AppState::new(self.store.clone()));

        if self.config.server.cors_enabled {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers(Any)
                .allow_origin(Any);
            app = app.layer(cors);
        }

        app.layer(TraceLayer::new_for_http())
    }

    /// Serve until `shutdown` resolves
    pub async fn run(&self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr = self.config.listen_addr()?;
        let listener = TcpListener::bind(&addr).await.context("Failed to bind HTTP server")?;

        info!("HTTP API server listening on http://{}", addr);

        axum::serve(listener, self.app())
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("HTTP server shutting down");
            })
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}

/// Resolves once `signal` fires.
///
/// If the signal cannot be listened for, the error is logged and this never
/// resolves: the server keeps serving without graceful shutdown.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal, graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}
