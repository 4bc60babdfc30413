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
        reservation::{
            CreateReservationRequest, CreateReservationResponse, Reservation, ReservationStatus,
            SetStatusRequest,
        },
        response::ApiResponse,
    },
};
use pitchbook_notify::ConfirmationSummary;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the reservation list endpoint.
///
/// `client_id` scopes the view to one client and takes precedence over the
/// admin `name`/`email` search.
#[derive(Debug, Deserialize)]
pub struct ReservationListQuery {
    pub client_id: Option<Uuid>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub date: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn list_reservations(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ReservationListQuery>,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, AppError> {
    let db_reservations = pitchbook_db::repositories::reservation::list_reservations(
        &state.db_pool,
        query.client_id,
        query.name.as_deref(),
        query.email.as_deref(),
        query.status.as_deref(),
        query.date,
    )
    .await
    .map_err(BookingError::Database)?;

    let mut reservations = Vec::with_capacity(db_reservations.len());
    for db_reservation in db_reservations {
        reservations.push(db_reservation.into_model().map_err(BookingError::Database)?);
    }

    Ok(Json(ApiResponse::list(reservations)))
}

#[axum::debug_handler]
pub async fn get_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let db_reservation =
        pitchbook_db::repositories::reservation::get_reservation_by_id(&state.db_pool, id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation with ID {id} not found")))?;

    let reservation = db_reservation.into_model().map_err(BookingError::Database)?;
    Ok(Json(ApiResponse::ok(reservation)))
}

#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateReservationResponse>>), AppError> {
    let spec = payload.validate()?;

    let db_reservation =
        pitchbook_db::repositories::reservation::create_reservation(&state.db_pool, &spec).await?;
    let reservation = db_reservation.into_model().map_err(BookingError::Database)?;

    let (email_sent, email_error) = notify_if_confirmed(&state, &reservation).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Reservation created",
            CreateReservationResponse {
                reservation,
                email_sent,
                email_error,
            },
        )),
    ))
}

#[axum::debug_handler]
pub async fn update_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let spec = payload.validate()?;

    let db_reservation =
        pitchbook_db::repositories::reservation::update_reservation(&state.db_pool, id, &spec)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation with ID {id} not found")))?;

    let reservation = db_reservation.into_model().map_err(BookingError::Database)?;
    Ok(Json(ApiResponse::with_message(
        "Reservation updated",
        reservation,
    )))
}

#[axum::debug_handler]
pub async fn set_reservation_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<CreateReservationResponse>>, AppError> {
    let next = ReservationStatus::parse(&payload.status).ok_or_else(|| {
        BookingError::InvalidStatus(format!("unknown reservation status '{}'", payload.status))
    })?;

    let db_reservation = pitchbook_db::repositories::reservation::set_status(
        &state.db_pool,
        id,
        next,
        payload.cancellation_reason.as_deref(),
    )
    .await?
    .ok_or_else(|| BookingError::NotFound(format!("Reservation with ID {id} not found")))?;

    let reservation = db_reservation.into_model().map_err(BookingError::Database)?;

    // Confirmation resends on every transition into the confirmed state,
    // including a no-op re-confirmation.
    let (email_sent, email_error) = notify_if_confirmed(&state, &reservation).await;

    Ok(Json(ApiResponse::with_message(
        "Reservation status updated",
        CreateReservationResponse {
            reservation,
            email_sent,
            email_error,
        },
    )))
}

#[axum::debug_handler]
pub async fn delete_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let db_reservation =
        pitchbook_db::repositories::reservation::delete_reservation(&state.db_pool, id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation with ID {id} not found")))?;

    let reservation = db_reservation.into_model().map_err(BookingError::Database)?;
    Ok(Json(ApiResponse::with_message(
        "Reservation deleted",
        reservation,
    )))
}

/// Best-effort confirmation delivery; never fails the request.
async fn notify_if_confirmed(
    state: &ApiState,
    reservation: &Reservation,
) -> (bool, Option<String>) {
    if reservation.status != ReservationStatus::Confirmed {
        return (false, None);
    }
    let Some(email) = reservation.client_email.clone() else {
        return (false, None);
    };

    let summary = ConfirmationSummary {
        client_name: reservation.client_name.clone(),
        client_email: email,
        client_phone: reservation.client_phone.clone(),
        pitch_name: reservation.pitch_name.clone(),
        pitch_kind: reservation.pitch_kind.clone(),
        date: reservation.date,
        start_time: reservation.start_time,
        end_time: reservation.end_time,
        tariff: reservation.tariff,
        status: reservation.status.as_str().to_string(),
    };

    let report = state.notifier.send_confirmation(&summary).await;
    (report.sent, report.error)
}
