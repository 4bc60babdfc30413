use crate::models::DbSlot;
use crate::db_err;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use pitchbook_core::errors::BookingError;
use pitchbook_core::models::slot::SlotSpec;
use sqlx::{Pool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

pub async fn create_slot(pool: &Pool<Postgres>, spec: &SlotSpec) -> Result<DbSlot, BookingError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    lock_pitch(&mut tx, spec.pitch_id).await?;
    check_reserved_overlap(
        &mut tx,
        spec.pitch_id,
        spec.date,
        spec.start_time,
        spec.end_time,
        None,
    )
    .await?;

    let id = Uuid::new_v4();
    let now = Utc::now();

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        INSERT INTO slots (id, pitch_id, date, start_time, end_time, status, tariff, holder_name, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, pitch_id, date, start_time, end_time, status, tariff, holder_name, created_at
        "#,
    )
    .bind(id)
    .bind(spec.pitch_id)
    .bind(spec.date)
    .bind(spec.start_time)
    .bind(spec.end_time)
    .bind(spec.status.as_str())
    .bind(spec.tariff)
    .bind(&spec.holder_name)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    tx.commit().await.map_err(db_err)?;

    Ok(slot)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, pitch_id, date, start_time, end_time, status, tariff, holder_name, created_at
        FROM slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn list_slots(
    pool: &Pool<Postgres>,
    date: Option<NaiveDate>,
    pitch_id: Option<Uuid>,
    kind: Option<&str>,
    surface: Option<&str>,
) -> Result<Vec<DbSlot>> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT s.id, s.pitch_id, s.date, s.start_time, s.end_time, s.status, \
         s.tariff, s.holder_name, s.created_at \
         FROM slots s \
         JOIN pitches p ON p.id = s.pitch_id \
         WHERE 1 = 1",
    );

    if let Some(date) = date {
        query.push(" AND s.date = ").push_bind(date);
    }
    if let Some(pitch_id) = pitch_id {
        query.push(" AND s.pitch_id = ").push_bind(pitch_id);
    }
    if let Some(kind) = kind {
        query.push(" AND p.kind = ").push_bind(kind.to_string());
    }
    if let Some(surface) = surface {
        query.push(" AND p.surface = ").push_bind(surface.to_string());
    }

    query.push(" ORDER BY s.date ASC, s.start_time ASC");

    let slots = query
        .build_query_as::<DbSlot>()
        .fetch_all(pool)
        .await?;

    Ok(slots)
}

pub async fn update_slot(
    pool: &Pool<Postgres>,
    id: Uuid,
    spec: &SlotSpec,
) -> Result<Option<DbSlot>, BookingError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    lock_pitch(&mut tx, spec.pitch_id).await?;
    check_reserved_overlap(
        &mut tx,
        spec.pitch_id,
        spec.date,
        spec.start_time,
        spec.end_time,
        Some(id),
    )
    .await?;

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        UPDATE slots
        SET pitch_id = $2, date = $3, start_time = $4, end_time = $5,
            status = $6, tariff = $7, holder_name = $8
        WHERE id = $1
        RETURNING id, pitch_id, date, start_time, end_time, status, tariff, holder_name, created_at
        "#,
    )
    .bind(id)
    .bind(spec.pitch_id)
    .bind(spec.date)
    .bind(spec.start_time)
    .bind(spec.end_time)
    .bind(spec.status.as_str())
    .bind(spec.tariff)
    .bind(&spec.holder_name)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?;

    tx.commit().await.map_err(db_err)?;

    Ok(slot)
}

pub async fn delete_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>, BookingError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let existing = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, pitch_id, date, start_time, end_time, status, tariff, holder_name, created_at
        FROM slots
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?;

    let Some(existing) = existing else {
        return Ok(None);
    };

    // A reserved slot still backed by an active reservation must not disappear.
    if existing.status == "reserved" {
        let backing = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reservations
                WHERE pitch_id = $1
                  AND date = $2
                  AND status IN ('en attente', 'confirmée')
                  AND start_time < $4
                  AND end_time > $3
            )
            "#,
        )
        .bind(existing.pitch_id)
        .bind(existing.date)
        .bind(existing.start_time)
        .bind(existing.end_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        if backing {
            return Err(BookingError::Conflict(format!(
                "Slot {id} is held by an active reservation"
            )));
        }
    }

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        DELETE FROM slots
        WHERE id = $1
        RETURNING id, pitch_id, date, start_time, end_time, status, tariff, holder_name, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?;

    tx.commit().await.map_err(db_err)?;

    Ok(slot)
}

async fn lock_pitch(tx: &mut Transaction<'_, Postgres>, pitch_id: Uuid) -> Result<(), BookingError> {
    let found = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id FROM pitches WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(pitch_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)?;

    if found.is_none() {
        return Err(BookingError::NotFound(format!(
            "Pitch with ID {pitch_id} not found"
        )));
    }

    Ok(())
}

/// Rejects a window that intersects a reserved slot on the same pitch and date.
async fn check_reserved_overlap(
    tx: &mut Transaction<'_, Postgres>,
    pitch_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    exclude: Option<Uuid>,
) -> Result<(), BookingError> {
    let clashing = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id FROM slots
        WHERE pitch_id = $1
          AND date = $2
          AND status = 'reserved'
          AND start_time < $4
          AND end_time > $3
          AND ($5::uuid IS NULL OR id <> $5)
        LIMIT 1
        "#,
    )
    .bind(pitch_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(exclude)
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)?;

    if clashing.is_some() {
        return Err(BookingError::Conflict(format!(
            "Window {start_time}-{end_time} on {date} overlaps a reserved slot"
        )));
    }

    Ok(())
}
