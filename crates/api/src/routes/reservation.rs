use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/reservations",
            get(handlers::reservation::list_reservations),
        )
        .route(
            "/api/reservations",
            post(handlers::reservation::create_reservation),
        )
        .route(
            "/api/reservations/:id",
            get(handlers::reservation::get_reservation),
        )
        .route(
            "/api/reservations/:id",
            put(handlers::reservation::update_reservation),
        )
        .route(
            "/api/reservations/:id",
            delete(handlers::reservation::delete_reservation),
        )
        .route(
            "/api/reservations/:id/status",
            put(handlers::reservation::set_reservation_status),
        )
}
