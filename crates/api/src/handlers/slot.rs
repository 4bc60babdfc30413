use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use pitchbook_core::{
    errors::BookingError,
    models::{
        response::ApiResponse,
        slot::{BulkCreateSlotsRequest, CreateSlotRequest, Slot, ranges_overlap},
    },
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the slot list endpoint.
#[derive(Debug, Deserialize)]
pub struct SlotListQuery {
    pub date: Option<NaiveDate>,
    pub pitch_id: Option<Uuid>,
    pub kind: Option<String>,
    pub surface: Option<String>,
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotListQuery>,
) -> Result<Json<ApiResponse<Vec<Slot>>>, AppError> {
    let db_slots = pitchbook_db::repositories::slot::list_slots(
        &state.db_pool,
        query.date,
        query.pitch_id,
        query.kind.as_deref(),
        query.surface.as_deref(),
    )
    .await
    .map_err(BookingError::Database)?;

    let mut slots = Vec::with_capacity(db_slots.len());
    for db_slot in db_slots {
        slots.push(db_slot.into_model().map_err(BookingError::Database)?);
    }

    Ok(Json(ApiResponse::list(slots)))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateSlotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Slot>>), AppError> {
    let spec = payload.validate()?;

    let db_slot = pitchbook_db::repositories::slot::create_slot(&state.db_pool, &spec).await?;
    let slot = db_slot.into_model().map_err(BookingError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Slot created", slot)),
    ))
}

/// Administrative bulk generation of a slot grid.
///
/// The whole batch is validated up front, including pairwise overlap between
/// entries on the same pitch and date. Entries are then inserted one by one;
/// a window clashing with an already-reserved slot aborts the remainder.
#[axum::debug_handler]
pub async fn create_slots_bulk(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BulkCreateSlotsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Slot>>>), AppError> {
    if payload.slots.is_empty() {
        return Err(AppError(BookingError::Validation(
            "slots must not be empty".to_string(),
        )));
    }

    let mut specs = Vec::with_capacity(payload.slots.len());
    for entry in payload.slots {
        specs.push(entry.validate()?);
    }

    for (i, a) in specs.iter().enumerate() {
        for b in &specs[i + 1..] {
            if a.pitch_id == b.pitch_id
                && a.date == b.date
                && ranges_overlap(a.start_time, a.end_time, b.start_time, b.end_time)
            {
                return Err(AppError(BookingError::Validation(format!(
                    "slots {}-{} and {}-{} on {} overlap each other",
                    a.start_time, a.end_time, b.start_time, b.end_time, a.date
                ))));
            }
        }
    }

    let mut created = Vec::with_capacity(specs.len());
    for spec in &specs {
        let db_slot = pitchbook_db::repositories::slot::create_slot(&state.db_pool, spec).await?;
        created.push(db_slot.into_model().map_err(BookingError::Database)?);
    }

    let count = created.len();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            message: Some(format!("{count} slots created")),
            count: Some(count),
            data: created,
        }),
    ))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Slot>>, AppError> {
    let db_slot = pitchbook_db::repositories::slot::get_slot_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {id} not found")))?;

    let slot = db_slot.into_model().map_err(BookingError::Database)?;
    Ok(Json(ApiResponse::ok(slot)))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateSlotRequest>,
) -> Result<Json<ApiResponse<Slot>>, AppError> {
    let spec = payload.validate()?;

    let db_slot = pitchbook_db::repositories::slot::update_slot(&state.db_pool, id, &spec)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {id} not found")))?;

    let slot = db_slot.into_model().map_err(BookingError::Database)?;
    Ok(Json(ApiResponse::with_message("Slot updated", slot)))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Slot>>, AppError> {
    let db_slot = pitchbook_db::repositories::slot::delete_slot(&state.db_pool, id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {id} not found")))?;

    let slot = db_slot.into_model().map_err(BookingError::Database)?;
    Ok(Json(ApiResponse::with_message("Slot deleted", slot)))
}
