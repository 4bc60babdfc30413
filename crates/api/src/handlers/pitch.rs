use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use pitchbook_core::{
    errors::BookingError,
    models::{
        pitch::{CreatePitchRequest, Pitch},
        response::ApiResponse,
    },
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_pitch(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePitchRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Pitch>>), AppError> {
    let spec = payload.validate()?;

    // An owning client must exist before the pitch can reference it
    if let Some(client_id) = spec.client_id {
        let client_exists =
            pitchbook_db::repositories::client::get_client_by_id(&state.db_pool, client_id)
                .await
                .map_err(BookingError::Database)?
                .is_some();

        if !client_exists {
            return Err(AppError(BookingError::NotFound(format!(
                "Client with ID {client_id} not found"
            ))));
        }
    }

    let db_pitch = pitchbook_db::repositories::pitch::create_pitch(&state.db_pool, &spec)
        .await
        .map_err(BookingError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Pitch created",
            db_pitch.into_model(),
        )),
    ))
}

#[axum::debug_handler]
pub async fn get_pitch(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Pitch>>, AppError> {
    let db_pitch = pitchbook_db::repositories::pitch::get_pitch_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Pitch with ID {id} not found")))?;

    Ok(Json(ApiResponse::ok(db_pitch.into_model())))
}

#[axum::debug_handler]
pub async fn list_pitches(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<Vec<Pitch>>>, AppError> {
    let pitches = pitchbook_db::repositories::pitch::list_pitches(&state.db_pool)
        .await
        .map_err(BookingError::Database)?
        .into_iter()
        .map(|p| p.into_model())
        .collect();

    Ok(Json(ApiResponse::list(pitches)))
}

#[axum::debug_handler]
pub async fn update_pitch(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreatePitchRequest>,
) -> Result<Json<ApiResponse<Pitch>>, AppError> {
    let spec = payload.validate()?;

    let db_pitch = pitchbook_db::repositories::pitch::update_pitch(&state.db_pool, id, &spec)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Pitch with ID {id} not found")))?;

    Ok(Json(ApiResponse::with_message(
        "Pitch updated",
        db_pitch.into_model(),
    )))
}

#[axum::debug_handler]
pub async fn delete_pitch(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Pitch>>, AppError> {
    // Referential guard: slots or reservations keep the pitch alive
    let referenced = pitchbook_db::repositories::pitch::pitch_is_referenced(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    if referenced {
        return Err(AppError(BookingError::Conflict(format!(
            "Pitch with ID {id} is referenced by slots or reservations"
        ))));
    }

    let db_pitch = pitchbook_db::repositories::pitch::delete_pitch(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Pitch with ID {id} not found")))?;

    Ok(Json(ApiResponse::with_message(
        "Pitch deleted",
        db_pitch.into_model(),
    )))
}
