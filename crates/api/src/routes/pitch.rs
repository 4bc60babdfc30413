use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/pitches", get(handlers::pitch::list_pitches))
        .route("/api/pitches", post(handlers::pitch::create_pitch))
        .route("/api/pitches/:id", get(handlers::pitch::get_pitch))
        .route("/api/pitches/:id", put(handlers::pitch::update_pitch))
        .route("/api/pitches/:id", delete(handlers::pitch::delete_pitch))
}
