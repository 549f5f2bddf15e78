//! HTTP server implementation for the inventory API

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::api_handlers;
use crate::constants::MAX_BODY_BYTES;
use inventory_core::{
    core::{AppState, ConfiguredAppState},
    log_info,
    storage::StorageImpl,
};

/// Creates the main application router with all routes and middleware
pub fn create_router<S: StorageImpl>(app_state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // Root route
        .route("/", get(api_handlers::root_handler))
        // Product routes
        .route("/product", post(api_handlers::create_product::<S>))
        .route(
            "/product/{id}",
            get(api_handlers::get_product::<S>).put(api_handlers::update_stock::<S>),
        )
        .route("/product/{id}/stock", post(api_handlers::add_stock::<S>))
        // System routes
        .route("/health", get(api_handlers::health_check::<S>))
        .fallback(api_handlers::not_found_handler)
        // Apply middleware to ALL routes
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(app_state)
}

/// Serve `app` on `addr` until `shutdown` resolves
async fn serve_with_app(
    addr: SocketAddr,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log_info!("Server listening on http://{}", addr);
    log_info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Start the HTTP server with the configured AppState
pub async fn start_api_server(
    configured_app_state: ConfiguredAppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let http_addr = configured_app_state.http_addr();

    log_info!(
        "Starting inventory API on {} with {} backend",
        http_addr,
        configured_app_state.backend_name()
    );

    // Match once on storage type to get concrete AppState, then start server
    match configured_app_state {
        ConfiguredAppState::Sqlite { app_state } => {
            serve_with_app(http_addr, create_router(app_state), shutdown).await
        }
        ConfiguredAppState::Document { app_state } => {
            serve_with_app(http_addr, create_router(app_state), shutdown).await
        }
        ConfiguredAppState::Memory { app_state } => {
            serve_with_app(http_addr, create_router(app_state), shutdown).await
        }
    }
}
