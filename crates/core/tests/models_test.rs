use chrono::{NaiveDate, NaiveTime, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use uuid::Uuid;

use pitchbook_core::errors::BookingError;
use pitchbook_core::models::{
    pitch::{CreatePitchRequest, Pitch},
    reservation::{CreateReservationRequest, Reservation, ReservationStatus},
    response::ApiResponse,
    slot::{CreateSlotRequest, SlotStatus, ranges_overlap},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_pitch_serialization() {
    let pitch = Pitch {
        id: Uuid::new_v4(),
        name: "Terrain A".to_string(),
        kind: "5-a-side".to_string(),
        surface: "synthetic".to_string(),
        tariff: 60.0,
        equipment: Some(vec!["floodlights".to_string()]),
        client_id: None,
        created_at: Utc::now(),
    };

    let json = to_string(&pitch).expect("Failed to serialize pitch");
    let deserialized: Pitch = from_str(&json).expect("Failed to deserialize pitch");

    assert_eq!(deserialized.id, pitch.id);
    assert_eq!(deserialized.name, pitch.name);
    assert_eq!(deserialized.kind, pitch.kind);
    assert_eq!(deserialized.surface, pitch.surface);
    assert_eq!(deserialized.tariff, pitch.tariff);
    assert_eq!(deserialized.equipment, pitch.equipment);
}

#[test]
fn test_reservation_status_wire_labels() {
    assert_eq!(
        to_string(&ReservationStatus::Pending).unwrap(),
        "\"en attente\""
    );
    assert_eq!(
        to_string(&ReservationStatus::Confirmed).unwrap(),
        "\"confirmée\""
    );
    assert_eq!(
        to_string(&ReservationStatus::Cancelled).unwrap(),
        "\"annulée\""
    );
    assert_eq!(
        to_string(&ReservationStatus::Completed).unwrap(),
        "\"terminée\""
    );

    let parsed: ReservationStatus = from_str("\"confirmée\"").unwrap();
    assert_eq!(parsed, ReservationStatus::Confirmed);
}

#[rstest]
#[case("en attente", Some(ReservationStatus::Pending))]
#[case("confirmée", Some(ReservationStatus::Confirmed))]
#[case("annulée", Some(ReservationStatus::Cancelled))]
#[case("terminée", Some(ReservationStatus::Completed))]
#[case("pending", None)]
#[case("", None)]
fn test_reservation_status_parse(#[case] label: &str, #[case] expected: Option<ReservationStatus>) {
    assert_eq!(ReservationStatus::parse(label), expected);
}

#[rstest]
#[case(ReservationStatus::Pending, ReservationStatus::Confirmed, true)]
#[case(ReservationStatus::Pending, ReservationStatus::Cancelled, true)]
#[case(ReservationStatus::Pending, ReservationStatus::Completed, false)]
#[case(ReservationStatus::Confirmed, ReservationStatus::Cancelled, true)]
#[case(ReservationStatus::Confirmed, ReservationStatus::Completed, true)]
#[case(ReservationStatus::Confirmed, ReservationStatus::Pending, false)]
#[case(ReservationStatus::Cancelled, ReservationStatus::Pending, false)]
#[case(ReservationStatus::Cancelled, ReservationStatus::Confirmed, false)]
#[case(ReservationStatus::Completed, ReservationStatus::Confirmed, false)]
fn test_status_transition_table(
    #[case] from: ReservationStatus,
    #[case] to: ReservationStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[test]
fn test_same_status_transition_is_noop() {
    for status in [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ] {
        assert!(status.can_transition_to(status));
    }
}

#[test]
fn test_active_and_terminal_statuses() {
    assert!(ReservationStatus::Pending.is_active());
    assert!(ReservationStatus::Confirmed.is_active());
    assert!(!ReservationStatus::Cancelled.is_active());
    assert!(!ReservationStatus::Completed.is_active());

    assert!(ReservationStatus::Cancelled.is_terminal());
    assert!(ReservationStatus::Completed.is_terminal());
    assert!(!ReservationStatus::Pending.is_terminal());
}

#[test]
fn test_overlapping_windows_conflict() {
    // Existing booking 10:00-11:00, request 10:30-11:30 on the same pitch/date
    assert!(ranges_overlap(
        time(10, 0),
        time(11, 0),
        time(10, 30),
        time(11, 30)
    ));
}

#[test]
fn test_disjoint_windows_do_not_conflict() {
    // Back-to-back 10:00-11:00 then 11:00-12:00 must be legal
    assert!(!ranges_overlap(
        time(10, 0),
        time(11, 0),
        time(11, 0),
        time(12, 0)
    ));
}

#[rstest]
#[case(time(9, 0), time(10, 0), time(10, 0), time(11, 0), false)]
#[case(time(9, 0), time(10, 1), time(10, 0), time(11, 0), true)]
#[case(time(10, 15), time(10, 45), time(10, 0), time(11, 0), true)]
#[case(time(9, 0), time(12, 0), time(10, 0), time(11, 0), true)]
#[case(time(12, 0), time(13, 0), time(10, 0), time(11, 0), false)]
fn test_overlap_predicate_cases(
    #[case] a_start: NaiveTime,
    #[case] a_end: NaiveTime,
    #[case] b_start: NaiveTime,
    #[case] b_end: NaiveTime,
    #[case] expected: bool,
) {
    assert_eq!(ranges_overlap(a_start, a_end, b_start, b_end), expected);
    // Overlap is symmetric
    assert_eq!(ranges_overlap(b_start, b_end, a_start, a_end), expected);
}

#[test]
fn test_overlap_predicate_spans_days() {
    let a_start = date(2024, 6, 1).and_time(time(22, 0));
    let a_end = date(2024, 6, 2).and_time(time(1, 0));
    let b_start = date(2024, 6, 2).and_time(time(0, 0));
    let b_end = date(2024, 6, 2).and_time(time(2, 0));

    assert!(ranges_overlap(a_start, a_end, b_start, b_end));
}

#[rstest]
#[case(None, Some("5-a-side"), Some("synthetic"), Some(60.0), "name")]
#[case(Some("Terrain A"), None, Some("synthetic"), Some(60.0), "kind")]
#[case(Some("Terrain A"), Some("5-a-side"), None, Some(60.0), "surface")]
#[case(Some("Terrain A"), Some("5-a-side"), Some("synthetic"), None, "tariff")]
fn test_create_pitch_missing_fields(
    #[case] name: Option<&str>,
    #[case] kind: Option<&str>,
    #[case] surface: Option<&str>,
    #[case] tariff: Option<f64>,
    #[case] missing: &str,
) {
    let request = CreatePitchRequest {
        name: name.map(String::from),
        kind: kind.map(String::from),
        surface: surface.map(String::from),
        tariff,
        equipment: None,
        client_id: None,
    };

    let err = request.validate().unwrap_err();
    match err {
        BookingError::Validation(msg) => assert!(msg.contains(missing)),
        other => panic!("Expected Validation error, got: {other:?}"),
    }
}

#[test]
fn test_create_pitch_negative_tariff_rejected() {
    let request = CreatePitchRequest {
        name: Some("Terrain A".to_string()),
        kind: Some("5-a-side".to_string()),
        surface: Some("synthetic".to_string()),
        tariff: Some(-1.0),
        equipment: None,
        client_id: None,
    };

    assert!(matches!(
        request.validate(),
        Err(BookingError::Validation(_))
    ));
}

fn full_reservation_request() -> CreateReservationRequest {
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

#[test]
fn test_create_reservation_request_valid() {
    let spec = full_reservation_request().validate().unwrap();
    assert_eq!(spec.status, ReservationStatus::Confirmed);
    assert_eq!(spec.date, date(2024, 6, 1));
}

#[rstest]
#[case("client_id")]
#[case("pitch_id")]
#[case("date")]
#[case("start_time")]
#[case("end_time")]
#[case("status")]
fn test_create_reservation_missing_field(#[case] field: &str) {
    let mut request = full_reservation_request();
    match field {
        "client_id" => request.client_id = None,
        "pitch_id" => request.pitch_id = None,
        "date" => request.date = None,
        "start_time" => request.start_time = None,
        "end_time" => request.end_time = None,
        "status" => request.status = None,
        _ => unreachable!(),
    }

    let err = request.validate().unwrap_err();
    match err {
        BookingError::Validation(msg) => assert!(msg.contains(field)),
        other => panic!("Expected Validation error, got: {other:?}"),
    }
}

#[test]
fn test_create_reservation_unknown_status() {
    let mut request = full_reservation_request();
    request.status = Some("booked".to_string());

    assert!(matches!(
        request.validate(),
        Err(BookingError::InvalidStatus(_))
    ));
}

#[test]
fn test_create_reservation_inverted_range() {
    let mut request = full_reservation_request();
    request.start_time = Some(time(11, 0));
    request.end_time = Some(time(10, 0));

    assert!(matches!(
        request.validate(),
        Err(BookingError::Validation(_))
    ));
}

#[test]
fn test_create_slot_request_defaults_to_available() {
    let request = CreateSlotRequest {
        pitch_id: Some(Uuid::new_v4()),
        date: Some(date(2024, 6, 1)),
        start_time: Some(time(10, 0)),
        end_time: Some(time(11, 0)),
        status: None,
        tariff: None,
        holder_name: None,
    };

    let spec = request.validate().unwrap();
    assert_eq!(spec.status, SlotStatus::Available);
}

#[test]
fn test_create_slot_inverted_range_rejected() {
    let request = CreateSlotRequest {
        pitch_id: Some(Uuid::new_v4()),
        date: Some(date(2024, 6, 1)),
        start_time: Some(time(11, 0)),
        end_time: Some(time(11, 0)),
        status: None,
        tariff: None,
        holder_name: None,
    };

    assert!(matches!(
        request.validate(),
        Err(BookingError::Validation(_))
    ));
}

#[test]
fn test_reservation_serialization_round_trip() {
    let reservation = Reservation {
        id: Uuid::new_v4(),
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
        status: ReservationStatus::Confirmed,
        cancellation_reason: None,
        created_at: Utc::now(),
    };

    let json = to_string(&reservation).expect("Failed to serialize reservation");
    assert!(json.contains("confirmée"));

    let deserialized: Reservation = from_str(&json).expect("Failed to deserialize reservation");
    assert_eq!(deserialized.id, reservation.id);
    assert_eq!(deserialized.status, reservation.status);
    assert_eq!(deserialized.start_time, reservation.start_time);
}

#[test]
fn test_list_envelope_carries_count() {
    let response = ApiResponse::list(vec![1, 2, 3]);

    assert!(response.success);
    assert_eq!(response.count, Some(3));

    let json = to_string(&response).unwrap();
    assert!(json.contains("\"count\":3"));
}

#[test]
fn test_ok_envelope_omits_optional_fields() {
    let response = ApiResponse::ok("payload");
    let json = to_string(&response).unwrap();

    assert!(json.contains("\"success\":true"));
    assert!(!json.contains("message"));
    assert!(!json.contains("count"));
}
