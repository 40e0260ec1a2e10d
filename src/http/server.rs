//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum app with a single catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve every request through the route table
//! - Hand bound path parameters to the handler via request extensions
//! - Swap in a new route table on config reload
//! - Graceful shutdown on the lifecycle signal

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ConfigError, RouterConfig};
use crate::http::handler::{build_router, BoxHandler};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::metrics;
use crate::routing::{Params, SharedRouter};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<SharedRouter<BoxHandler>>,
}

/// HTTP server fronting the route table.
pub struct HttpServer {
    app: Router,
    config: RouterConfig,
    routes: Arc<SharedRouter<BoxHandler>>,
}

impl HttpServer {
    /// Create a server whose route table is built from `config.routes`.
    ///
    /// Fails with [`ConfigError::Route`] if a route cannot be registered.
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        let table = build_router(&config.routes)?;
        tracing::info!(routes = table.len(), "Route table built");
        Ok(Self::with_routes(config, Arc::new(SharedRouter::new(table))))
    }

    /// Create a server around an existing, possibly programmatic, route table.
    pub fn with_routes(config: RouterConfig, routes: Arc<SharedRouter<BoxHandler>>) -> Self {
        let state = AppState {
            routes: Arc::clone(&routes),
        };
        let app = Self::build_app(&config, state);
        Self {
            app,
            config,
            routes,
        }
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Each config received on `config_updates` replaces the route table;
    /// configs whose routes cannot be registered are logged and ignored.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let routes = Arc::clone(&self.routes);
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match build_router(&config.routes) {
                    Ok(table) => {
                        tracing::info!(routes = table.len(), "Route table replaced");
                        routes.replace(table);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rejected reloaded routes, keeping current table");
                    }
                }
            }
        });

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The Axum app, for serving or driving directly with `tower::ServiceExt`.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Shared route table; routes registered here are live immediately.
    pub fn routes(&self) -> Arc<SharedRouter<BoxHandler>> {
        Arc::clone(&self.routes)
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Catch-all handler: resolve the route, bind parameters, invoke the handler.
async fn dispatch(State(state): State<AppState>, mut request: Request) -> Response {
    let start_time = Instant::now();
    let method = request.method().as_str().to_owned();
    let path = request.uri().path().to_owned();
    let request_id = request_id(&request).to_owned();

    let mut params = Params::new();
    let Some(handler) = state.routes.lookup(&method, &path, &mut params) else {
        tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
        metrics::record_dispatch(&method, metrics::Outcome::NotFound, start_time);
        return not_found(&method, &path);
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        params = params.len(),
        "Route matched"
    );

    if !params.is_empty() {
        request.extensions_mut().insert(params);
    }

    let response = handler(request).await;
    metrics::record_dispatch(&method, metrics::Outcome::Matched, start_time);
    response
}

fn not_found(method: &str, path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not found",
            "method": method,
            "path": path,
        })),
    )
        .into_response()
}
