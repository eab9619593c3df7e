//! User model for authenticated accounts.
//!
//! [`User`] is the complete `users` row (server only, derives
//! `sqlx::FromRow`); [`User::to_info`] projects it into [`UserInfo`], the
//! client-safe subset that crosses the server/client boundary: no password
//! hash, no timestamps, and the `Uuid` flattened to `String` so it works in
//! WASM.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

impl UserInfo {
    /// Get display name, falling back to the username if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_username() {
        let info = UserInfo {
            id: "u1".into(),
            username: "admin".into(),
            name: None,
        };
        assert_eq!(info.display_name(), "admin");

        let named = UserInfo {
            name: Some("Ada".into()),
            ..info
        };
        assert_eq!(named.display_name(), "Ada");
    }
}
