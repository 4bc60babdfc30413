use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/calendar/conflicts",
            get(handlers::calendar::check_conflicts),
        )
        .route("/api/calendar/day", get(handlers::calendar::day_view))
}
