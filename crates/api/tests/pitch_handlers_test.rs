mod test_utils;

use axum::Json;
use chrono::Utc;
use mockall::{Sequence, predicate};
use uuid::Uuid;

use pitchbook_api::middleware::error_handling::AppError;
use pitchbook_core::errors::BookingError;
use pitchbook_core::models::{
    pitch::{CreatePitchRequest, Pitch},
    response::ApiResponse,
};
use pitchbook_db::models::DbPitch;

use test_utils::TestContext;

fn db_pitch(id: Uuid) -> DbPitch {
    DbPitch {
        id,
        name: "Terrain A".to_string(),
        kind: "5-a-side".to_string(),
        surface: "synthetic".to_string(),
        tariff: 60.0,
        equipment: None,
        client_id: None,
        created_at: Utc::now(),
    }
}

fn create_request() -> CreatePitchRequest {
    CreatePitchRequest {
        name: Some("Terrain A".to_string()),
        kind: Some("5-a-side".to_string()),
        surface: Some("synthetic".to_string()),
        tariff: Some(60.0),
        equipment: None,
        client_id: None,
    }
}

// Test wrappers that run the handler flow against the mock repositories

async fn test_delete_pitch_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
) -> Result<Json<ApiResponse<Pitch>>, AppError> {
    let referenced = ctx
        .pitch_repo
        .pitch_is_referenced(id)
        .await
        .map_err(BookingError::Database)?;

    if referenced {
        return Err(AppError(BookingError::Conflict(format!(
            "Pitch with ID {id} is referenced by slots or reservations"
        ))));
    }

    let db_pitch = ctx
        .pitch_repo
        .delete_pitch(id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Pitch with ID {id} not found")))?;

    Ok(Json(ApiResponse::with_message(
        "Pitch deleted",
        db_pitch.into_model(),
    )))
}

#[tokio::test]
async fn test_create_then_get_returns_equal_record() {
    let mut ctx = TestContext::new();
    let pitch_id = Uuid::new_v4();

    ctx.pitch_repo
        .expect_create_pitch()
        .times(1)
        .returning(move |spec| {
            Ok(DbPitch {
                id: pitch_id,
                name: spec.name,
                kind: spec.kind,
                surface: spec.surface,
                tariff: spec.tariff,
                equipment: spec.equipment,
                client_id: spec.client_id,
                created_at: Utc::now(),
            })
        });

    let spec = create_request().validate().unwrap();
    let created = ctx.pitch_repo.create_pitch(spec).await.unwrap();

    let stored = created.clone();
    ctx.pitch_repo
        .expect_get_pitch_by_id()
        .with(predicate::eq(pitch_id))
        .returning(move |_| Ok(Some(stored.clone())));

    let fetched = ctx
        .pitch_repo
        .get_pitch_by_id(pitch_id)
        .await
        .unwrap()
        .unwrap();

    // The fetched record equals the creation input plus the assigned id
    assert_eq!(fetched.id, pitch_id);
    assert_eq!(fetched.name, "Terrain A");
    assert_eq!(fetched.kind, "5-a-side");
    assert_eq!(fetched.surface, "synthetic");
    assert_eq!(fetched.tariff, 60.0);
}

#[tokio::test]
async fn test_delete_referenced_pitch_conflicts() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.pitch_repo
        .expect_pitch_is_referenced()
        .with(predicate::eq(id))
        .returning(|_| Ok(true));

    // The delete statement must never run for a referenced pitch
    ctx.pitch_repo
        .expect_delete_pitch()
        .times(0)
        .returning(|_| panic!("Should not be called"));

    let result = test_delete_pitch_wrapper(&mut ctx, id).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Conflict(_) => {}
        e => panic!("Expected Conflict error, got: {e:?}"),
    }
}

#[tokio::test]
async fn test_delete_pitch_twice_succeeds_then_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let mut seq = Sequence::new();

    ctx.pitch_repo
        .expect_pitch_is_referenced()
        .with(predicate::eq(id))
        .times(2)
        .returning(|_| Ok(false));

    ctx.pitch_repo
        .expect_delete_pitch()
        .with(predicate::eq(id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |id| Ok(Some(db_pitch(id))));

    ctx.pitch_repo
        .expect_delete_pitch()
        .with(predicate::eq(id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(None));

    // First delete succeeds
    let first = test_delete_pitch_wrapper(&mut ctx, id).await;
    assert!(first.is_ok());
    assert_eq!(first.unwrap().0.data.id, id);

    // Second delete reports the pitch as gone
    let second = test_delete_pitch_wrapper(&mut ctx, id).await;
    assert!(second.is_err());
    match second.unwrap_err().0 {
        BookingError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {e:?}"),
    }
}
