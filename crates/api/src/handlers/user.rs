use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use pitchbook_core::{
    errors::BookingError,
    models::{
        response::ApiResponse,
        user::{CreateUserRequest, LoginRequest, LoginResponse, User},
    },
};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "username is required".to_string(),
        )));
    }
    if payload.password.is_empty() {
        return Err(AppError(BookingError::Validation(
            "password is required".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password)?;
    let role = payload.role.as_deref().unwrap_or("staff");

    let db_user = pitchbook_db::repositories::user::create_user(
        &state.db_pool,
        &payload.username,
        &password_hash,
        role,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User created",
            db_user.into_model(),
        )),
    ))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let db_user = pitchbook_db::repositories::user::get_user_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("User with ID {id} not found")))?;

    Ok(Json(ApiResponse::ok(db_user.into_model())))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let valid =
        auth::verify_user_password(&state.db_pool, &payload.username, &payload.password)
            .await
            .map_err(BookingError::Database)?;

    Ok(Json(ApiResponse::ok(LoginResponse { valid })))
}
