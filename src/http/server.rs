//! HTTP server setup.
//!
//! # Responsibilities
//! - Hold the shared services in [`AppState`]
//! - Build the Axum router for every endpoint
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Serve until the shutdown channel fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request},
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, RwLock};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::ApiService;
use crate::cache::TtlCache;
use crate::config::AppConfig;
use crate::directory::Directory;
use crate::forms::AppSettings;
use crate::health::HealthService;
use crate::http::handlers;
use crate::http::request::{self, RequestIdMaker, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::resilience::RetryPolicy;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cache: TtlCache<String, Value>,
    pub directory: Directory,
    pub health: Arc<HealthService>,
    pub settings: Arc<RwLock<AppSettings>>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let retry = RetryPolicy::from(&config.retries);
        let health = HealthService::new(config.app.version.clone(), config.api.clone(), retry);

        Self {
            config: Arc::new(config),
            cache: TtlCache::new(),
            directory: Directory::new(),
            health: Arc::new(health),
            settings: Arc::new(RwLock::new(AppSettings::default())),
        }
    }

    /// A fresh, unopened API service for one request.
    pub fn api_service(&self) -> ApiService {
        ApiService::new(self.config.api.clone(), RetryPolicy::from(&self.config.retries))
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.config.cache.default_ttl_secs)
    }
}

/// HTTP server for the showcase API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
        let router = Self::build_router(state, timeout);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request timeout only covers local routes. Routes that call out
    /// run under the client timeout and retry policy instead, so their
    /// failures still come back as a JSON body.
    #[allow(deprecated)]
    pub fn build_router(state: AppState, timeout: Duration) -> Router {
        let request_id_header = HeaderName::from_static(X_REQUEST_ID);

        let local = Router::new()
            .route("/health", get(handlers::health))
            .route("/health/details", get(handlers::health_details))
            .route("/api/users", get(handlers::list_users).post(handlers::create_user))
            .route(
                "/api/users/{email}",
                get(handlers::get_user).patch(handlers::update_user),
            )
            .route(
                "/api/cache/{key}",
                get(handlers::cache_get)
                    .put(handlers::cache_put)
                    .delete(handlers::cache_delete),
            )
            .route("/api/chart", get(handlers::chart))
            .route("/api/greet", post(handlers::greet))
            .route("/api/forms/credentials", post(handlers::submit_credentials))
            .route("/api/forms/upload", post(handlers::submit_upload))
            .route("/api/forms/email", post(handlers::check_email))
            .route(
                "/api/settings",
                get(handlers::get_settings).put(handlers::put_settings),
            )
            .layer(TimeoutLayer::new(timeout));

        let outbound = Router::new()
            .route("/health/dependencies", get(handlers::health_dependencies))
            .route("/health/report", get(handlers::health_report))
            .route("/api/connection-test", post(handlers::connection_test))
            .route("/api/fetch", post(handlers::fetch));

        local
            .merge(outbound)
            .route_layer(middleware::from_fn(request::track_requests))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(
                        request_id_header.clone(),
                        RequestIdMaker,
                    ))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |req: &Request<Body>| {
                            tracing::info_span!(
                                "request",
                                request_id = %request::request_id(req),
                                method = %req.method(),
                                path = %req.uri().path(),
                            )
                        },
                    ))
                    .layer(PropagateRequestIdLayer::new(request_id_header)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
