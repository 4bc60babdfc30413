use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/clients", get(handlers::client::list_clients))
        .route("/api/clients", post(handlers::client::create_client))
        .route("/api/clients/:id", get(handlers::client::get_client))
        .route("/api/clients/:id", put(handlers::client::update_client))
        .route("/api/clients/:id", delete(handlers::client::delete_client))
        .route(
            "/api/clients/:id/subscription",
            patch(handlers::client::update_subscription),
        )
}
