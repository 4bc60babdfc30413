use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use pitchbook_core::{
    errors::BookingError,
    models::{
        client::{Client, CreateClientRequest, UpdateSubscriptionRequest},
        response::ApiResponse,
    },
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_client(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Client>>), AppError> {
    let spec = payload.validate()?;

    let db_client = pitchbook_db::repositories::client::create_client(&state.db_pool, &spec).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Client created",
            db_client.into_model(),
        )),
    ))
}

#[axum::debug_handler]
pub async fn get_client(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let db_client = pitchbook_db::repositories::client::get_client_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Client with ID {id} not found")))?;

    Ok(Json(ApiResponse::ok(db_client.into_model())))
}

#[axum::debug_handler]
pub async fn list_clients(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<Vec<Client>>>, AppError> {
    let clients = pitchbook_db::repositories::client::list_clients(&state.db_pool)
        .await
        .map_err(BookingError::Database)?
        .into_iter()
        .map(|c| c.into_model())
        .collect();

    Ok(Json(ApiResponse::list(clients)))
}

#[axum::debug_handler]
pub async fn update_client(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let spec = payload.validate()?;

    let db_client = pitchbook_db::repositories::client::update_client(&state.db_pool, id, &spec)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Client with ID {id} not found")))?;

    Ok(Json(ApiResponse::with_message(
        "Client updated",
        db_client.into_model(),
    )))
}

#[axum::debug_handler]
pub async fn update_subscription(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubscriptionRequest>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let db_client =
        pitchbook_db::repositories::client::update_subscription(&state.db_pool, id, &payload)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| BookingError::NotFound(format!("Client with ID {id} not found")))?;

    Ok(Json(ApiResponse::with_message(
        "Subscription updated",
        db_client.into_model(),
    )))
}

#[axum::debug_handler]
pub async fn delete_client(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    // Referential guard: reservations or owned pitches keep the client alive
    let referenced = pitchbook_db::repositories::client::client_is_referenced(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    if referenced {
        return Err(AppError(BookingError::Conflict(format!(
            "Client with ID {id} is referenced by reservations or pitches"
        ))));
    }

    let db_client = pitchbook_db::repositories::client::delete_client(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Client with ID {id} not found")))?;

    Ok(Json(ApiResponse::with_message(
        "Client deleted",
        db_client.into_model(),
    )))
}
