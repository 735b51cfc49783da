//! # Agenda API
//!
//! The API crate provides the web server for the agenda scheduling service.
//! It exposes public authentication endpoints and an admin surface for
//! managing bookable time blocks.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Thin adapters from HTTP to service calls
//! - **Services**: Business logic returning domain results
//! - **Middleware**: Cross-cutting concerns (JWT auth, error mapping)
//! - **Config**: Environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database access.

/// Configuration module for API settings
pub mod config;
/// Request handlers translating HTTP to service calls
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Business logic over the repositories
pub mod services;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state accessible to all request handlers.
///
/// The store handle and configuration are injected here rather than read
/// from process globals, so tests can substitute their own.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Runtime configuration (JWT secret, development flag, ...)
    pub config: config::ApiConfig,
}

/// Starts the API server with the provided configuration and database pool.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let request_timeout = config.request_timeout;
    let cors_origins = config.cors_origins.clone();
    let addr = config.server_addr();

    // Create shared state with dependencies
    let state = Arc::new(ApiState { db_pool, config });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public authentication endpoints
        .merge(routes::auth::routes(state.clone()))
        // Admin time-block endpoints
        .merge(routes::admin::routes(state.clone()))
        // Availability endpoints
        .merge(routes::availability::routes(state.clone()))
        // Request/response logging
        .layer(tower_http::trace::TraceLayer::new_for_http())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(request_timeout),
    ));

    // Start the HTTP server
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
