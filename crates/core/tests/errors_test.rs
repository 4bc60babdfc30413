use pitchbook_core::errors::{BookingError, BookingResult};
use std::error::Error;

#[test]
fn test_booking_error_display() {
    let not_found = BookingError::NotFound("Pitch not found".to_string());
    let validation = BookingError::Validation("Invalid input".to_string());
    let invalid_status = BookingError::InvalidStatus("unknown status 'foo'".to_string());
    let conflict = BookingError::Conflict("Window already booked".to_string());
    let authentication = BookingError::Authentication("Invalid password".to_string());
    let database = BookingError::Database(eyre::eyre!("Database connection failed"));
    let internal = BookingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(not_found.to_string(), "Resource not found: Pitch not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(
        invalid_status.to_string(),
        "Invalid status: unknown status 'foo'"
    );
    assert_eq!(conflict.to_string(), "Conflict: Window already booked");
    assert_eq!(
        authentication.to_string(),
        "Authentication error: Invalid password"
    );
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let booking_error = BookingError::Internal(Box::new(io_error));

    assert!(booking_error.source().is_some());
}

#[test]
fn test_booking_result() {
    let result: BookingResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: BookingResult<i32> = Err(BookingError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_trait_implementation() {
    let eyre_error = eyre::eyre!("Database error");
    let booking_error = BookingError::Database(eyre_error);

    assert!(booking_error.to_string().contains("Database error"));
}
