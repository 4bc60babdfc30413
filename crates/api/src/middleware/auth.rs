//! # Authentication Module
//!
//! Password hashing and verification for user accounts, built on Argon2 with
//! a random salt per password. Hashes are stored and compared in PHC string
//! format; plaintext passwords never reach the database layer.

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use eyre::Result;

/// Hashes a password using the Argon2 algorithm.
///
/// Generates a fresh random salt and uses the default Argon2 parameters.
/// The returned string is in PHC format (algorithm, version, parameters,
/// salt and hash).
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a username/password pair against the stored hash.
///
/// Delegates to the database repository; an unknown username verifies as
/// false rather than erroring.
pub async fn verify_user_password(
    pool: &sqlx::PgPool,
    username: &str,
    password: &str,
) -> Result<bool> {
    let is_valid =
        pitchbook_db::repositories::user::verify_password(pool, username, password).await?;
    Ok(is_valid)
}
