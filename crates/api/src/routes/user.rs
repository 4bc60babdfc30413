use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/users", post(handlers::user::create_user))
        .route("/api/users/login", post(handlers::user::login))
        .route("/api/users/:id", get(handlers::user::get_user))
}
