//! Free-form calendar queries.
//!
//! The calendar surface does not store anything of its own: conflict probes
//! and day views are answered from the slot grid and the active reservations
//! with the same half-open overlap predicate the booking path enforces.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;

use pitchbook_core::{
    errors::BookingError,
    models::{
        calendar::{ConflictCheckResponse, DayViewResponse},
        response::ApiResponse,
    },
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the conflict probe.
///
/// The probed range may span days: start and end are composed from a date
/// and a time each.
#[derive(Debug, Deserialize)]
pub struct ConflictQuery {
    pub pitch_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
}

#[axum::debug_handler]
pub async fn check_conflicts(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ConflictQuery>,
) -> Result<Json<ApiResponse<ConflictCheckResponse>>, AppError> {
    let pitch_id = query
        .pitch_id
        .ok_or_else(|| BookingError::Validation("pitch_id is required".to_string()))?;
    let start_date = query
        .start_date
        .ok_or_else(|| BookingError::Validation("start_date is required".to_string()))?;
    let start_time = query
        .start_time
        .ok_or_else(|| BookingError::Validation("start_time is required".to_string()))?;
    let end_date = query.end_date.unwrap_or(start_date);
    let end_time = query
        .end_time
        .ok_or_else(|| BookingError::Validation("end_time is required".to_string()))?;

    let start = start_date.and_time(start_time);
    let end = end_date.and_time(end_time);

    if end <= start {
        return Err(AppError(BookingError::Validation(
            "end must be after start".to_string(),
        )));
    }

    // The probed pitch must exist
    let pitch_exists = pitchbook_db::repositories::pitch::get_pitch_by_id(&state.db_pool, pitch_id)
        .await
        .map_err(BookingError::Database)?
        .is_some();

    if !pitch_exists {
        return Err(AppError(BookingError::NotFound(format!(
            "Pitch with ID {pitch_id} not found"
        ))));
    }

    let conflicts =
        pitchbook_db::repositories::calendar::find_conflicts(&state.db_pool, pitch_id, start, end)
            .await
            .map_err(BookingError::Database)?;

    let response = ConflictCheckResponse {
        has_conflict: !conflicts.is_empty(),
        conflicts,
    };

    Ok(Json(ApiResponse::ok(response)))
}

/// Query parameters for the day view.
#[derive(Debug, Deserialize)]
pub struct DayViewQuery {
    pub pitch_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn day_view(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DayViewQuery>,
) -> Result<Json<ApiResponse<DayViewResponse>>, AppError> {
    let pitch_id = query
        .pitch_id
        .ok_or_else(|| BookingError::Validation("pitch_id is required".to_string()))?;
    let date = query
        .date
        .ok_or_else(|| BookingError::Validation("date is required".to_string()))?;

    let windows = pitchbook_db::repositories::calendar::day_view(&state.db_pool, pitch_id, date)
        .await
        .map_err(BookingError::Database)?;

    let response = DayViewResponse {
        pitch_id,
        date,
        windows,
    };

    Ok(Json(ApiResponse::ok(response)))
}
