//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID, headers)
//! - Record per-route metrics
//! - Bind server to listener and shut down gracefully

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath, Request},
    http,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api;
use crate::auth::{CredentialHasher, CredentialStore, HashError};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::observability::metrics;
use crate::security::{self, FileSandbox};

/// Application state injected into handlers.
///
/// Everything in here is read-only after construction.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub hasher: Arc<CredentialHasher>,
    pub sandbox: Arc<FileSandbox>,
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: AppConfig, store: Arc<dyn CredentialStore>) -> Result<Self, HashError> {
        let state = AppState {
            store,
            hasher: Arc::new(CredentialHasher::new(&config.hashing)?),
            sandbox: Arc::new(FileSandbox::new(config.files.base_dir.clone())),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let router = api::router()
            .route_layer(middleware::from_fn(track_request))
            .fallback(api::status::not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size));
        let router = with_timeout(router, Duration::from_secs(config.timeouts.request_secs));

        let router = if config.security.enable_headers {
            security::headers::apply(router)
        } else {
            router
        };

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &http::Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_dir = %self.config.files.base_dir.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Bound handler time. An expired request gets the JSON error envelope
/// instead of the timeout layer's empty 408.
#[allow(deprecated)]
fn with_timeout(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::map_response(timeout_envelope))
}

async fn timeout_envelope(response: Response) -> Response {
    if response.status() == http::StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out");
        return ApiError::Timeout.into_response();
    }
    response
}

/// Record status and latency for matched routes.
async fn track_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = request.method().clone();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        tracing::warn!(route = %route, status = status.as_u16(), "Request failed");
    } else {
        tracing::debug!(route = %route, status = status.as_u16(), "Request completed");
    }
    metrics::record_request(&route, method.as_str(), status.as_u16(), start);
    response
}
