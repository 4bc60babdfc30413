pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use pitchbook_core::errors::BookingError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Postgres unique-constraint violation class.
const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn db_err(err: sqlx::Error) -> BookingError {
    BookingError::Database(err.into())
}

/// Maps a unique-constraint violation to Conflict, everything else to Database.
pub(crate) fn unique_err(err: sqlx::Error, what: &str) -> BookingError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return BookingError::Conflict(format!("{what} already exists"));
        }
    }
    db_err(err)
}
