//! Free-form range queries over the unified slot/reservation interval data.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use eyre::Result;
use pitchbook_core::models::calendar::ConflictWindow;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct DbWindow {
    source: String,
    id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    status: String,
}

impl DbWindow {
    fn into_model(self) -> ConflictWindow {
        ConflictWindow {
            source: self.source,
            id: self.id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status,
        }
    }
}

/// Returns every held window on the pitch that intersects `[start, end)`.
///
/// Both sides of the ledger are probed: reserved slots and active
/// reservations. `date + time` composition lets the probe span days.
pub async fn find_conflicts(
    pool: &Pool<Postgres>,
    pitch_id: Uuid,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<ConflictWindow>> {
    let windows = sqlx::query_as::<_, DbWindow>(
        r#"
        SELECT 'slot' AS source, id, date, start_time, end_time, status
        FROM slots
        WHERE pitch_id = $1
          AND status = 'reserved'
          AND (date + start_time) < $3
          AND (date + end_time) > $2
        UNION ALL
        SELECT 'reservation' AS source, id, date, start_time, end_time, status
        FROM reservations
        WHERE pitch_id = $1
          AND status IN ('en attente', 'confirmée')
          AND (date + start_time) < $3
          AND (date + end_time) > $2
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(pitch_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(windows.into_iter().map(DbWindow::into_model).collect())
}

/// Every window (any status) on one pitch for one date, in grid order.
pub async fn day_view(
    pool: &Pool<Postgres>,
    pitch_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<ConflictWindow>> {
    let windows = sqlx::query_as::<_, DbWindow>(
        r#"
        SELECT 'slot' AS source, id, date, start_time, end_time, status
        FROM slots
        WHERE pitch_id = $1 AND date = $2
        UNION ALL
        SELECT 'reservation' AS source, id, date, start_time, end_time, status
        FROM reservations
        WHERE pitch_id = $1 AND date = $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(pitch_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(windows.into_iter().map(DbWindow::into_model).collect())
}
