mod test_utils;

use axum::Json;
use chrono::{NaiveDate, NaiveTime, Utc};
use mockall::predicate;
use uuid::Uuid;

use pitchbook_api::middleware::error_handling::AppError;
use pitchbook_core::errors::BookingError;
use pitchbook_core::models::{
    reservation::{
        CreateReservationRequest, CreateReservationResponse, Reservation, ReservationStatus,
    },
    response::ApiResponse,
};
use pitchbook_db::models::DbReservation;
use pitchbook_notify::{ConfirmationSummary, NotifyClient, NotifyConfig};

use test_utils::TestContext;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn db_reservation(id: Uuid, status: &str) -> DbReservation {
    DbReservation {
        id,
        client_id: Uuid::new_v4(),
        client_name: "Karim Benz".to_string(),
        client_email: Some("karim@example.com".to_string()),
        client_phone: None,
        pitch_id: Uuid::new_v4(),
        pitch_name: "Terrain A".to_string(),
        pitch_kind: "5-a-side".to_string(),
        pitch_surface: "synthetic".to_string(),
        date: date(2024, 6, 1),
        start_time: time(10, 0),
        end_time: time(11, 0),
        tariff: 60.0,
        status: status.to_string(),
        cancellation_reason: None,
        created_at: Utc::now(),
    }
}

fn create_request() -> CreateReservationRequest {
    CreateReservationRequest {
        client_id: Some(Uuid::new_v4()),
        pitch_id: Some(Uuid::new_v4()),
        date: Some(date(2024, 6, 1)),
        start_time: Some(time(10, 0)),
        end_time: Some(time(11, 0)),
        status: Some("confirmée".to_string()),
        tariff: Some(60.0),
        cancellation_reason: None,
    }
}

// Test wrappers that run the handler flow against the mock repositories

async fn test_create_reservation_wrapper(
    ctx: &mut TestContext,
    request: CreateReservationRequest,
) -> Result<Json<ApiResponse<CreateReservationResponse>>, AppError> {
    let spec = request.validate()?;

    let db_reservation = ctx.reservation_repo.create_reservation(spec).await?;
    let reservation = db_reservation.into_model().map_err(BookingError::Database)?;

    // The test notifier is never configured, so delivery reports not-sent
    let notifier = NotifyClient::new(NotifyConfig::default());
    let (email_sent, email_error) = match (&reservation.status, &reservation.client_email) {
        (ReservationStatus::Confirmed, Some(email)) => {
            let report = notifier
                .send_confirmation(&ConfirmationSummary {
                    client_name: reservation.client_name.clone(),
                    client_email: email.clone(),
                    client_phone: reservation.client_phone.clone(),
                    pitch_name: reservation.pitch_name.clone(),
                    pitch_kind: reservation.pitch_kind.clone(),
                    date: reservation.date,
                    start_time: reservation.start_time,
                    end_time: reservation.end_time,
                    tariff: reservation.tariff,
                    status: reservation.status.as_str().to_string(),
                })
                .await;
            (report.sent, report.error)
        }
        _ => (false, None),
    };

    Ok(Json(ApiResponse::with_message(
        "Reservation created",
        CreateReservationResponse {
            reservation,
            email_sent,
            email_error,
        },
    )))
}

async fn test_get_reservation_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let db_reservation = ctx
        .reservation_repo
        .get_reservation_by_id(id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Reservation with ID {id} not found")))?;

    let reservation = db_reservation.into_model().map_err(BookingError::Database)?;
    Ok(Json(ApiResponse::ok(reservation)))
}

async fn test_set_status_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    status_label: &str,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let next = ReservationStatus::parse(status_label).ok_or_else(|| {
        BookingError::InvalidStatus(format!("unknown reservation status '{status_label}'"))
    })?;

    let db_reservation = ctx
        .reservation_repo
        .set_status(id, next, None)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Reservation with ID {id} not found")))?;

    let reservation = db_reservation.into_model().map_err(BookingError::Database)?;
    Ok(Json(ApiResponse::ok(reservation)))
}

#[tokio::test]
async fn test_create_reservation_success_reports_email_metadata() {
    let mut ctx = TestContext::new();
    let reservation_id = Uuid::new_v4();

    ctx.reservation_repo
        .expect_create_reservation()
        .times(1)
        .returning(move |spec| {
            let mut row = db_reservation(reservation_id, spec.status.as_str());
            row.client_id = spec.client_id;
            row.pitch_id = spec.pitch_id;
            Ok(row)
        });

    let result = test_create_reservation_wrapper(&mut ctx, create_request()).await;

    assert!(result.is_ok());
    let response = result.unwrap().0;
    assert!(response.success);

    let data = response.data;
    assert_eq!(data.reservation.id, reservation_id);
    assert_eq!(data.reservation.status, ReservationStatus::Confirmed);
    // Gateway is unconfigured in tests: the flag is present and false
    assert!(!data.email_sent);
    assert!(data.email_error.is_some());
}

#[tokio::test]
async fn test_create_reservation_missing_field_performs_no_write() {
    let mut ctx = TestContext::new();

    // The repository must not be touched when validation fails
    ctx.reservation_repo
        .expect_create_reservation()
        .times(0)
        .returning(|_| panic!("Should not be called"));

    let mut request = create_request();
    request.date = None;

    let result = test_create_reservation_wrapper(&mut ctx, request).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Validation(msg) => assert!(msg.contains("date")),
        e => panic!("Expected Validation error, got: {e:?}"),
    }
}

#[tokio::test]
async fn test_create_reservation_overlap_is_rejected() {
    let mut ctx = TestContext::new();

    ctx.reservation_repo
        .expect_create_reservation()
        .times(1)
        .returning(|_| {
            Err(BookingError::Conflict(
                "Pitch already has an active reservation overlapping 10:30-11:30".to_string(),
            ))
        });

    let mut request = create_request();
    request.start_time = Some(time(10, 30));
    request.end_time = Some(time(11, 30));

    let result = test_create_reservation_wrapper(&mut ctx, request).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Conflict(_) => {}
        e => panic!("Expected Conflict error, got: {e:?}"),
    }
}

#[tokio::test]
async fn test_get_reservation_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.reservation_repo
        .expect_get_reservation_by_id()
        .with(predicate::eq(id))
        .returning(|_| Ok(None));

    let result = test_get_reservation_wrapper(&mut ctx, id).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {e:?}"),
    }
}

#[tokio::test]
async fn test_set_status_unknown_label_leaves_record_unchanged() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    // Parsing fails before any repository call
    ctx.reservation_repo
        .expect_set_status()
        .times(0)
        .returning(|_, _, _| panic!("Should not be called"));

    let result = test_set_status_wrapper(&mut ctx, id, "finished").await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::InvalidStatus(msg) => assert!(msg.contains("finished")),
        e => panic!("Expected InvalidStatus error, got: {e:?}"),
    }
}

#[tokio::test]
async fn test_set_status_illegal_transition_rejected() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    // Repository enforces the transition table inside its transaction
    ctx.reservation_repo
        .expect_set_status()
        .with(
            predicate::eq(id),
            predicate::eq(ReservationStatus::Confirmed),
            predicate::eq(None::<String>),
        )
        .returning(|_, _, _| {
            Err(BookingError::InvalidStatus(
                "cannot move reservation from 'annulée' to 'confirmée'".to_string(),
            ))
        });

    let result = test_set_status_wrapper(&mut ctx, id, "confirmée").await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::InvalidStatus(_) => {}
        e => panic!("Expected InvalidStatus error, got: {e:?}"),
    }
}

#[tokio::test]
async fn test_set_status_success() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.reservation_repo
        .expect_set_status()
        .with(
            predicate::eq(id),
            predicate::eq(ReservationStatus::Cancelled),
            predicate::eq(None::<String>),
        )
        .returning(move |id, next, _| Ok(Some(db_reservation(id, next.as_str()))));

    let result = test_set_status_wrapper(&mut ctx, id, "annulée").await;

    assert!(result.is_ok());
    let response = result.unwrap().0;
    assert_eq!(response.data.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn test_update_then_get_round_trip() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.reservation_repo
        .expect_update_reservation()
        .times(1)
        .returning(move |id, spec| {
            let mut row = db_reservation(id, spec.status.as_str());
            row.client_id = spec.client_id;
            row.pitch_id = spec.pitch_id;
            row.date = spec.date;
            row.start_time = spec.start_time;
            row.end_time = spec.end_time;
            Ok(Some(row))
        });

    let mut request = create_request();
    request.start_time = Some(time(14, 0));
    request.end_time = Some(time(15, 0));
    request.status = Some("en attente".to_string());

    let spec = request.validate().unwrap();
    let updated = ctx
        .reservation_repo
        .update_reservation(id, spec)
        .await
        .unwrap()
        .unwrap();

    // A subsequent get returns exactly the updated fields
    let fetched = updated.clone();
    ctx.reservation_repo
        .expect_get_reservation_by_id()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(fetched.clone())));

    let result = test_get_reservation_wrapper(&mut ctx, id).await;

    assert!(result.is_ok());
    let reservation = result.unwrap().0.data;
    assert_eq!(reservation.id, id);
    assert_eq!(reservation.start_time, time(14, 0));
    assert_eq!(reservation.end_time, time(15, 0));
    assert_eq!(reservation.status, ReservationStatus::Pending);
}
