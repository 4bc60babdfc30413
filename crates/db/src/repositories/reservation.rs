//! Reservation ledger persistence.
//!
//! Every write that can change which reservation holds a time window runs in
//! one transaction: the pitch row is locked with `SELECT ... FOR UPDATE` to
//! serialize bookings per pitch, the half-open overlap check runs against
//! active reservations, and the cached slot status is flipped before commit.

use crate::db_err;
use crate::models::DbReservation;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use pitchbook_core::errors::BookingError;
use pitchbook_core::models::reservation::{ReservationSpec, ReservationStatus};
use sqlx::{Pool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

const RESERVATION_COLUMNS: &str = "id, client_id, client_name, client_email, client_phone, \
     pitch_id, pitch_name, pitch_kind, pitch_surface, \
     date, start_time, end_time, tariff, status, cancellation_reason, created_at";

pub async fn list_reservations(
    pool: &Pool<Postgres>,
    client_id: Option<Uuid>,
    name: Option<&str>,
    email: Option<&str>,
    status: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<Vec<DbReservation>> {
    let mut query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE 1 = 1"
    ));

    // A client-scoped view wins over the admin name/email search.
    if let Some(client_id) = client_id {
        query.push(" AND client_id = ").push_bind(client_id);
    } else {
        if let Some(name) = name {
            query.push(" AND client_name = ").push_bind(name.to_string());
        }
        if let Some(email) = email {
            query
                .push(" AND client_email = ")
                .push_bind(email.to_string());
        }
    }
    if let Some(status) = status {
        query.push(" AND status = ").push_bind(status.to_string());
    }
    if let Some(date) = date {
        query.push(" AND date = ").push_bind(date);
    }

    query.push(" ORDER BY date DESC, start_time DESC");

    let reservations = query
        .build_query_as::<DbReservation>()
        .fetch_all(pool)
        .await?;

    Ok(reservations)
}

pub async fn get_reservation_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbReservation>> {
    let reservation = sqlx::query_as::<_, DbReservation>(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(reservation)
}

pub async fn create_reservation(
    pool: &Pool<Postgres>,
    spec: &ReservationSpec,
) -> Result<DbReservation, BookingError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let client = fetch_client(&mut tx, spec.client_id).await?;
    let pitch = lock_pitch(&mut tx, spec.pitch_id).await?;

    if spec.status.is_active() {
        check_active_overlap(
            &mut tx,
            spec.pitch_id,
            spec.date,
            spec.start_time,
            spec.end_time,
            None,
        )
        .await?;
    }

    let id = Uuid::new_v4();
    let now = Utc::now();
    let tariff = spec.tariff.unwrap_or(pitch.tariff);

    tracing::debug!(
        "Creating reservation: id={}, pitch={}, date={}, window={}-{}, status={}",
        id,
        pitch.id,
        spec.date,
        spec.start_time,
        spec.end_time,
        spec.status.as_str()
    );

    let reservation = sqlx::query_as::<_, DbReservation>(&format!(
        r#"
        INSERT INTO reservations
            (id, client_id, client_name, client_email, client_phone,
             pitch_id, pitch_name, pitch_kind, pitch_surface,
             date, start_time, end_time, tariff, status, cancellation_reason, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING {RESERVATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(client.id)
    .bind(&client.name)
    .bind(&client.email)
    .bind(&client.phone)
    .bind(pitch.id)
    .bind(&pitch.name)
    .bind(&pitch.kind)
    .bind(&pitch.surface)
    .bind(spec.date)
    .bind(spec.start_time)
    .bind(spec.end_time)
    .bind(tariff)
    .bind(spec.status.as_str())
    .bind(&spec.cancellation_reason)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    if spec.status.is_active() {
        mark_window_reserved(
            &mut tx,
            spec.pitch_id,
            spec.date,
            spec.start_time,
            spec.end_time,
            &client.name,
        )
        .await?;
    }

    tx.commit().await.map_err(db_err)?;

    Ok(reservation)
}

pub async fn update_reservation(
    pool: &Pool<Postgres>,
    id: Uuid,
    spec: &ReservationSpec,
) -> Result<Option<DbReservation>, BookingError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let Some(existing) = fetch_reservation_locked(&mut tx, id).await? else {
        return Ok(None);
    };

    let client = fetch_client(&mut tx, spec.client_id).await?;
    let pitch = lock_pitch(&mut tx, spec.pitch_id).await?;

    if spec.status.is_active() {
        check_active_overlap(
            &mut tx,
            spec.pitch_id,
            spec.date,
            spec.start_time,
            spec.end_time,
            Some(id),
        )
        .await?;
    }

    // Release the previously held window before claiming the new one.
    let previous_status = ReservationStatus::parse(&existing.status);
    if previous_status.is_some_and(|s| s.is_active()) {
        free_window(
            &mut tx,
            existing.pitch_id,
            existing.date,
            existing.start_time,
            existing.end_time,
        )
        .await?;
    }

    let tariff = spec.tariff.unwrap_or(pitch.tariff);

    let reservation = sqlx::query_as::<_, DbReservation>(&format!(
        r#"
        UPDATE reservations
        SET client_id = $2, client_name = $3, client_email = $4, client_phone = $5,
            pitch_id = $6, pitch_name = $7, pitch_kind = $8, pitch_surface = $9,
            date = $10, start_time = $11, end_time = $12, tariff = $13,
            status = $14, cancellation_reason = $15
        WHERE id = $1
        RETURNING {RESERVATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(client.id)
    .bind(&client.name)
    .bind(&client.email)
    .bind(&client.phone)
    .bind(pitch.id)
    .bind(&pitch.name)
    .bind(&pitch.kind)
    .bind(&pitch.surface)
    .bind(spec.date)
    .bind(spec.start_time)
    .bind(spec.end_time)
    .bind(tariff)
    .bind(spec.status.as_str())
    .bind(&spec.cancellation_reason)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    if spec.status.is_active() {
        mark_window_reserved(
            &mut tx,
            spec.pitch_id,
            spec.date,
            spec.start_time,
            spec.end_time,
            &client.name,
        )
        .await?;
    }

    tx.commit().await.map_err(db_err)?;

    Ok(Some(reservation))
}

pub async fn set_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    next: ReservationStatus,
    cancellation_reason: Option<&str>,
) -> Result<Option<DbReservation>, BookingError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let Some(existing) = fetch_reservation_locked(&mut tx, id).await? else {
        return Ok(None);
    };

    let current = ReservationStatus::parse(&existing.status).ok_or_else(|| {
        BookingError::Database(eyre::eyre!(
            "stored reservation status '{}' is not recognized",
            existing.status
        ))
    })?;

    if !current.can_transition_to(next) {
        return Err(BookingError::InvalidStatus(format!(
            "cannot move reservation from '{}' to '{}'",
            current.as_str(),
            next.as_str()
        )));
    }

    tracing::debug!(
        "Reservation {} status: {} -> {}",
        id,
        current.as_str(),
        next.as_str()
    );

    // Confirmation re-validates the window under the pitch lock.
    if next == ReservationStatus::Confirmed {
        lock_pitch(&mut tx, existing.pitch_id).await?;
        check_active_overlap(
            &mut tx,
            existing.pitch_id,
            existing.date,
            existing.start_time,
            existing.end_time,
            Some(id),
        )
        .await?;
    }

    let reservation = sqlx::query_as::<_, DbReservation>(&format!(
        r#"
        UPDATE reservations
        SET status = $2, cancellation_reason = COALESCE($3, cancellation_reason)
        WHERE id = $1
        RETURNING {RESERVATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(next.as_str())
    .bind(cancellation_reason)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    match (current.is_active(), next.is_active()) {
        (true, false) if next == ReservationStatus::Cancelled => {
            free_window(
                &mut tx,
                existing.pitch_id,
                existing.date,
                existing.start_time,
                existing.end_time,
            )
            .await?;
        }
        (false, true) => {
            mark_window_reserved(
                &mut tx,
                existing.pitch_id,
                existing.date,
                existing.start_time,
                existing.end_time,
                &existing.client_name,
            )
            .await?;
        }
        _ => {}
    }

    tx.commit().await.map_err(db_err)?;

    Ok(Some(reservation))
}

pub async fn delete_reservation(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbReservation>, BookingError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let reservation = sqlx::query_as::<_, DbReservation>(&format!(
        "DELETE FROM reservations WHERE id = $1 RETURNING {RESERVATION_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?;

    let Some(reservation) = reservation else {
        return Ok(None);
    };

    let was_active = ReservationStatus::parse(&reservation.status).is_some_and(|s| s.is_active());
    if was_active {
        free_window(
            &mut tx,
            reservation.pitch_id,
            reservation.date,
            reservation.start_time,
            reservation.end_time,
        )
        .await?;
    }

    tx.commit().await.map_err(db_err)?;

    Ok(Some(reservation))
}

#[derive(sqlx::FromRow)]
struct ClientRef {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

#[derive(sqlx::FromRow)]
struct PitchRef {
    id: Uuid,
    name: String,
    kind: String,
    surface: String,
    tariff: f64,
}

async fn fetch_client(
    tx: &mut Transaction<'_, Postgres>,
    client_id: Uuid,
) -> Result<ClientRef, BookingError> {
    sqlx::query_as::<_, ClientRef>(
        r#"
        SELECT id, name, email, phone FROM clients WHERE id = $1
        "#,
    )
    .bind(client_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| BookingError::NotFound(format!("Client with ID {client_id} not found")))
}

/// Locks the pitch row; all bookings for one pitch serialize on this lock.
async fn lock_pitch(
    tx: &mut Transaction<'_, Postgres>,
    pitch_id: Uuid,
) -> Result<PitchRef, BookingError> {
    sqlx::query_as::<_, PitchRef>(
        r#"
        SELECT id, name, kind, surface, tariff FROM pitches WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(pitch_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| BookingError::NotFound(format!("Pitch with ID {pitch_id} not found")))
}

async fn fetch_reservation_locked(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<DbReservation>, BookingError> {
    sqlx::query_as::<_, DbReservation>(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)
}

/// No two active reservations may hold intersecting `[start, end)` windows
/// on the same pitch and date.
async fn check_active_overlap(
    tx: &mut Transaction<'_, Postgres>,
    pitch_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    exclude: Option<Uuid>,
) -> Result<(), BookingError> {
    let clashing = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id FROM reservations
        WHERE pitch_id = $1
          AND date = $2
          AND status IN ('en attente', 'confirmée')
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
            "Pitch {pitch_id} already has an active reservation overlapping \
             {start_time}-{end_time} on {date}"
        )));
    }

    Ok(())
}

// The overlap invariant guarantees at most one active reservation per window,
// so any reserved slot in the range belongs to the reservation being released.
async fn free_window(
    tx: &mut Transaction<'_, Postgres>,
    pitch_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<(), BookingError> {
    sqlx::query(
        r#"
        UPDATE slots
        SET status = 'available', holder_name = NULL
        WHERE pitch_id = $1
          AND date = $2
          AND start_time < $4
          AND end_time > $3
          AND status = 'reserved'
        "#,
    )
    .bind(pitch_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .execute(&mut **tx)
    .await
    .map_err(db_err)?;

    Ok(())
}

async fn mark_window_reserved(
    tx: &mut Transaction<'_, Postgres>,
    pitch_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    holder_name: &str,
) -> Result<(), BookingError> {
    sqlx::query(
        r#"
        UPDATE slots
        SET status = 'reserved', holder_name = $5
        WHERE pitch_id = $1
          AND date = $2
          AND start_time < $4
          AND end_time > $3
          AND status = 'available'
        "#,
    )
    .bind(pitch_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(holder_name)
    .execute(&mut **tx)
    .await
    .map_err(db_err)?;

    Ok(())
}
