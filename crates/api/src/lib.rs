//! # Pitchbook API
//!
//! The API crate provides the web server implementation for the Pitchbook
//! booking service. It defines RESTful endpoints for managing pitches, slots,
//! reservations, clients, calendar queries and user accounts.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like authentication and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.
//! Booking confirmations are delivered through the notification gateway in
//! `pitchbook-notify`; delivery failures surface as response metadata and
//! never fail a request.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use pitchbook_notify::NotifyClient;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers.
///
/// Encapsulates the dependencies shared across the application: the database
/// connection pool and the notification gateway client.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Best-effort confirmation delivery client
    pub notifier: NotifyClient,
}

/// Starts the API server with the provided configuration and dependencies.
///
/// Initializes logging, assembles the router from the per-resource route
/// modules, applies CORS and timeout layers, and serves until shutdown.
pub async fn start_server(
    config: config::ApiConfig,
    db_pool: PgPool,
    notifier: NotifyClient,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState { db_pool, notifier });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Facility catalog endpoints
        .merge(routes::pitch::routes())
        // Slot calendar endpoints
        .merge(routes::slot::routes())
        // Reservation ledger endpoints
        .merge(routes::reservation::routes())
        // Client registry endpoints
        .merge(routes::client::routes())
        // Free-form calendar queries
        .merge(routes::calendar::routes())
        // User account endpoints
        .merge(routes::user::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::PATCH,
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
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            ))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
