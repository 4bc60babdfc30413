use crate::models::DbPitch;
use chrono::Utc;
use eyre::Result;
use pitchbook_core::models::pitch::PitchSpec;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_pitch(pool: &Pool<Postgres>, spec: &PitchSpec) -> Result<DbPitch> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let pitch = sqlx::query_as::<_, DbPitch>(
        r#"
        INSERT INTO pitches (id, name, kind, surface, tariff, equipment, client_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, kind, surface, tariff, equipment, client_id, created_at
        "#,
    )
    .bind(id)
    .bind(&spec.name)
    .bind(&spec.kind)
    .bind(&spec.surface)
    .bind(spec.tariff)
    .bind(&spec.equipment)
    .bind(spec.client_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(pitch)
}

pub async fn get_pitch_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPitch>> {
    let pitch = sqlx::query_as::<_, DbPitch>(
        r#"
        SELECT id, name, kind, surface, tariff, equipment, client_id, created_at
        FROM pitches
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(pitch)
}

pub async fn list_pitches(pool: &Pool<Postgres>) -> Result<Vec<DbPitch>> {
    let pitches = sqlx::query_as::<_, DbPitch>(
        r#"
        SELECT id, name, kind, surface, tariff, equipment, client_id, created_at
        FROM pitches
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(pitches)
}

pub async fn update_pitch(
    pool: &Pool<Postgres>,
    id: Uuid,
    spec: &PitchSpec,
) -> Result<Option<DbPitch>> {
    let pitch = sqlx::query_as::<_, DbPitch>(
        r#"
        UPDATE pitches
        SET name = $2, kind = $3, surface = $4, tariff = $5, equipment = $6, client_id = $7
        WHERE id = $1
        RETURNING id, name, kind, surface, tariff, equipment, client_id, created_at
        "#,
    )
    .bind(id)
    .bind(&spec.name)
    .bind(&spec.kind)
    .bind(&spec.surface)
    .bind(spec.tariff)
    .bind(&spec.equipment)
    .bind(spec.client_id)
    .fetch_optional(pool)
    .await?;

    Ok(pitch)
}

/// Referential guard for deletion: any slot or reservation keeps the pitch alive.
pub async fn pitch_is_referenced(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let referenced = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM slots WHERE pitch_id = $1)
            OR EXISTS (SELECT 1 FROM reservations WHERE pitch_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(referenced)
}

pub async fn delete_pitch(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPitch>> {
    let pitch = sqlx::query_as::<_, DbPitch>(
        r#"
        DELETE FROM pitches
        WHERE id = $1
        RETURNING id, name, kind, surface, tariff, equipment, client_id, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(pitch)
}
