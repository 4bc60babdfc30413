use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", get(handlers::slot::list_slots))
        .route("/api/slots", post(handlers::slot::create_slot))
        .route("/api/slots/bulk", post(handlers::slot::create_slots_bulk))
        .route("/api/slots/:id", get(handlers::slot::get_slot))
        .route("/api/slots/:id", put(handlers::slot::update_slot))
        .route("/api/slots/:id", delete(handlers::slot::delete_slot))
}
