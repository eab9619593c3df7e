//! Authentication support: session key, Argon2id password hashing, and the
//! bootstrap account.
//!
//! Passwords are hashed with the `argon2` crate's default (memory-hard)
//! Argon2id parameters and stored as PHC-format strings in the
//! `password_hash` column of the `users` table. The session carries nothing
//! but the user id under [`SESSION_USER_ID_KEY`].

#[cfg(feature = "server")]
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Hash a password using Argon2id. Returns a PHC-format string.
#[cfg(feature = "server")]
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
#[cfg(feature = "server")]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Ensure the bootstrap account exists.
///
/// Reads `PINMAP_ADMIN_USERNAME` / `PINMAP_ADMIN_PASSWORD` (defaulting to
/// `admin` / `admin`) and inserts the account if no user with that username
/// exists yet. Called once at server startup, before the listener binds.
#[cfg(feature = "server")]
pub async fn ensure_bootstrap_user() -> Result<(), String> {
    use crate::db::get_pool;

    let username =
        std::env::var("PINMAP_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password =
        std::env::var("PINMAP_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());

    let pool = get_pool().await.map_err(|e| e.to_string())?;

    let existing: Option<(uuid::Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(&username)
            .fetch_optional(pool)
            .await
            .map_err(|e| e.to_string())?;

    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(&password)?;

    sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
        .bind(&username)
        .bind(&password_hash)
        .execute(pool)
        .await
        .map_err(|e| e.to_string())?;

    tracing::info!("bootstrapped default account '{}'", username);
    Ok(())
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }
}
