//! # Error Handling Middleware
//!
//! Maps domain errors to the uniform failure envelope. Every handler returns
//! `Result<_, AppError>`; the `IntoResponse` implementation below converts
//! the wrapped [`BookingError`] into an HTTP status code and a
//! `{"success": false, "message": ...}` JSON body, so no error escapes the
//! process or leaks a non-envelope shape.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pitchbook_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
#[derive(Debug)]
pub struct AppError(pub BookingError);

/// Converts application errors to HTTP responses.
///
/// Maps each error type to the appropriate HTTP status code and formats the
/// error message into the failure envelope.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as the failure envelope
        let message = self.0.to_string();
        let body = Json(json!({ "success": false, "message": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from BookingError to AppError.
///
/// Allows using the `?` operator with functions that return
/// `Result<T, BookingError>` in handlers returning `Result<T, AppError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError.
///
/// Wraps the eyre error in a BookingError::Database variant so repository
/// failures propagate with `?`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}
