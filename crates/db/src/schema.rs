use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create clients table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(32) NULL,
            subscription_kind VARCHAR(64) NULL,
            subscription_start DATE NULL,
            subscription_end DATE NULL,
            subscription_price DOUBLE PRECISION NULL,
            payment_mode VARCHAR(64) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create pitches table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pitches (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            kind VARCHAR(64) NOT NULL,
            surface VARCHAR(64) NOT NULL,
            tariff DOUBLE PRECISION NOT NULL,
            equipment TEXT[] NULL,
            client_id UUID NULL REFERENCES clients(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT non_negative_tariff CHECK (tariff >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            pitch_id UUID NOT NULL REFERENCES pitches(id),
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'available',
            tariff DOUBLE PRECISION NULL,
            holder_name VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reservations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_id UUID NOT NULL REFERENCES clients(id),
            client_name VARCHAR(255) NOT NULL,
            client_email VARCHAR(255) NULL,
            client_phone VARCHAR(32) NULL,
            pitch_id UUID NOT NULL REFERENCES pitches(id),
            pitch_name VARCHAR(255) NOT NULL,
            pitch_kind VARCHAR(64) NOT NULL,
            pitch_surface VARCHAR(64) NOT NULL,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            tariff DOUBLE PRECISION NOT NULL,
            status VARCHAR(32) NOT NULL,
            cancellation_reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_reservation_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            username VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(32) NOT NULL DEFAULT 'staff',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; the pitch/date pairs also serve the read-only
    // analytics consumers that query these tables directly.
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_slots_pitch_date ON slots(pitch_id, date);
        CREATE INDEX IF NOT EXISTS idx_slots_status ON slots(status);
        CREATE INDEX IF NOT EXISTS idx_reservations_pitch_date ON reservations(pitch_id, date);
        CREATE INDEX IF NOT EXISTS idx_reservations_client_id ON reservations(client_id);
        CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status);
        CREATE INDEX IF NOT EXISTS idx_pitches_client_id ON pitches(client_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
