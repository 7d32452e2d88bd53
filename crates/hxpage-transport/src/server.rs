//! HTTP server using Axum.

use std::sync::Arc;

use axum::{
    Extension, Router,
    body::Body,
    http::Request as HttpRequest,
    response::{IntoResponse, Json},
    routing::get,
};
use hxpage_core::Config;
use hxpage_ui::{NamedRouter, Routes};
use serde_json::json;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span};

/// Errors starting the server.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// The page server — owns the listener task.
pub struct PageServer {
    /// Shutdown signal
    shutdown_tx: Option<mpsc::Sender<()>>,
    /// Server task handle
    handle: Option<tokio::task::JoinHandle<()>>,
    /// Actual bound port
    port: u16,
}

impl PageServer {
    /// Bind `config.http` and start serving `router` in the background.
    pub async fn start(config: Arc<Config>, router: NamedRouter) -> Result<Self, ServeError> {
        let (router, routes) = router.into_parts();
        Self::start_with_routes(config, router, routes).await
    }

    /// Start with a router that was split from its route registry, e.g. to
    /// add layers in between.
    pub async fn start_with_routes(
        config: Arc<Config>,
        router: Router,
        routes: Routes,
    ) -> Result<Self, ServeError> {
        let addr = config.bind_addr();
        let app = build_app(config, router, routes);

        let bind_err = |source| ServeError::Bind {
            addr: addr.clone(),
            source,
        };
        let listener = tokio::net::TcpListener::bind(addr.as_str())
            .await
            .map_err(bind_err)?;
        let local = listener.local_addr().map_err(bind_err)?;

        info!("hxpage listening on http://{local}");

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.recv().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
            port: local.port(),
        })
    }

    /// Get the actual bound port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Gracefully stop the server.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        info!("hxpage server stopped");
    }
}

/// Attach the shared request extensions, tracing and `/health` to `router`.
///
/// `router` must not define `/health` itself.
pub fn build_app(config: Arc<Config>, router: Router, routes: Routes) -> Router {
    router
        .route("/health", get(health_handler))
        .layer(Extension(Arc::new(routes)))
        .layer(Extension(config))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &HttpRequest<Body>| {
                let request_id = uuid::Uuid::new_v4();
                info_span!(
                    "request",
                    %request_id,
                    method = %request.method(),
                    path = %request.uri().path()
                )
            }),
        )
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn health_handler(Extension(config): Extension<Arc<Config>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "app": config.app.name,
        "environment": config.app.environment,
    }))
}
