//! Server Implementation
//!
//! Router assembly and HTTP server startup.

use crate::auth::require_auth;
use crate::core::{Config, ServerState};
use axum::{Router, middleware};
use http::HeaderValue;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::ServeDir;
use uuid::Uuid;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(crate::api::auth::router())
        .merge(crate::api::health::router())
        .merge(crate::api::upload::router())
        // Public QR landing APIs
        .merge(crate::api::public::router())
        // Superadmin console
        .merge(crate::api::admin::router())
        // Tenant dashboard APIs
        .merge(crate::api::menu::router())
        .merge(crate::api::orders::router())
        .merge(crate::api::staff::router())
        .merge(crate::api::managers::router())
        .merge(crate::api::tables::router())
        .merge(crate::api::customers::router())
        .merge(crate::api::expenses::router())
        .merge(crate::api::feedback::router())
        .merge(crate::api::reports::router())
}

/// Build a fully configured application with middleware, state, static
/// file services and the socket.io layer.
pub fn build_app(state: &ServerState) -> Router {
    let uploads_dir = state.config.uploads_dir();
    let qr_dir = state.config.qr_dir();

    build_router()
        // JWT auth + subscription gate; skips public routes internally
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone())
        // Public static files (uploaded images, table QR codes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .nest_service("/qr", ServeDir::new(qr_dir))
        // Realtime channel (intercepts /socket.io)
        .layer(state.socket_layer())
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(XRequestId))
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests and embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        // Start background tasks (outbox worker, billing sweep)
        state.start_background_tasks();

        let app = build_app(&state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Menu server listening on {}", addr);

        let shutdown_state = state.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
                shutdown_state.shutdown_background_tasks();
            })
            .await?;

        Ok(())
    }
}
