use crate::models::DbClient;
use crate::unique_err;
use chrono::Utc;
use eyre::Result;
use pitchbook_core::errors::BookingError;
use pitchbook_core::models::client::{ClientSpec, UpdateSubscriptionRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const CLIENT_COLUMNS: &str = "id, name, email, phone, subscription_kind, subscription_start, \
     subscription_end, subscription_price, payment_mode, created_at";

pub async fn create_client(
    pool: &Pool<Postgres>,
    spec: &ClientSpec,
) -> Result<DbClient, BookingError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let client = sqlx::query_as::<_, DbClient>(&format!(
        r#"
        INSERT INTO clients (id, name, email, phone, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {CLIENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&spec.name)
    .bind(&spec.email)
    .bind(&spec.phone)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| unique_err(e, "a client with this email"))?;

    Ok(client)
}

pub async fn get_client_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(&format!(
        "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

pub async fn list_clients(pool: &Pool<Postgres>) -> Result<Vec<DbClient>> {
    let clients = sqlx::query_as::<_, DbClient>(&format!(
        "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY name ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

pub async fn update_client(
    pool: &Pool<Postgres>,
    id: Uuid,
    spec: &ClientSpec,
) -> Result<Option<DbClient>, BookingError> {
    let client = sqlx::query_as::<_, DbClient>(&format!(
        r#"
        UPDATE clients
        SET name = $2, email = $3, phone = $4
        WHERE id = $1
        RETURNING {CLIENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&spec.name)
    .bind(&spec.email)
    .bind(&spec.phone)
    .fetch_optional(pool)
    .await
    .map_err(|e| unique_err(e, "a client with this email"))?;

    Ok(client)
}

/// Partial subscription update; omitted fields keep their stored value.
pub async fn update_subscription(
    pool: &Pool<Postgres>,
    id: Uuid,
    update: &UpdateSubscriptionRequest,
) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(&format!(
        r#"
        UPDATE clients
        SET subscription_kind = COALESCE($2, subscription_kind),
            subscription_start = COALESCE($3, subscription_start),
            subscription_end = COALESCE($4, subscription_end),
            subscription_price = COALESCE($5, subscription_price),
            payment_mode = COALESCE($6, payment_mode)
        WHERE id = $1
        RETURNING {CLIENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&update.kind)
    .bind(update.start_date)
    .bind(update.end_date)
    .bind(update.price)
    .bind(&update.payment_mode)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

/// Referential guard for deletion: any reservation keeps the client alive.
pub async fn client_is_referenced(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let referenced = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM reservations WHERE client_id = $1)
            OR EXISTS (SELECT 1 FROM pitches WHERE client_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(referenced)
}

pub async fn delete_client(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(&format!(
        "DELETE FROM clients WHERE id = $1 RETURNING {CLIENT_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}
