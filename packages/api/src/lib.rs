//! # API crate — shared fullstack server functions for PinMap
//!
//! This crate defines every Dioxus server function the web frontend calls,
//! along with the server-only modules backing them.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Argon2id password hashing, session key, bootstrap account |
//! | [`db`] | — | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`models`] | — | Database rows (`User`, `Marker`) and their client-safe projections |
//! | [`storage`] | `server` | S3 object store client and image key derivation |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function,
//! annotated with `#[get(...)]` or `#[post(...)]` and compiled twice: once
//! with the full server logic (behind `#[cfg(feature = "server")]`) and once
//! as a thin client stub that forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `login`, `logout`
//! - **Markers**: `list_markers`, `create_marker`, `update_marker`,
//!   `delete_marker`, `attach_marker_image`
//!
//! Reading markers is public; every mutation requires an authenticated
//! session. The client-side guard is a convenience, this is the boundary.

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod models;
#[cfg(feature = "server")]
pub mod storage;

pub use models::{MarkerInfo, UserInfo};

/// Helper: get the authenticated user's id from the session, or reject.
#[cfg(feature = "server")]
async fn require_user(
    session: &tower_sessions::Session,
) -> Result<uuid::Uuid, ServerFnError> {
    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Err(ServerFnError::new("Not authenticated"));
    };

    uuid::Uuid::parse_str(&user_id).map_err(|e| ServerFnError::new(e.to_string()))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user_uuid = uuid::Uuid::parse_str(&user_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log in with username and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(username: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let username = username.trim().to_string();

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Invalid username or password"));
    };

    let valid = auth::verify_password(&password, &user.password_hash)
        .map_err(|e| ServerFnError::new(e))?;

    if !valid {
        return Err(ServerFnError::new("Invalid username or password"));
    }

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(username: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// List all markers, oldest first. Public: anonymous visitors see pins too.
#[cfg(feature = "server")]
#[get("/api/markers")]
pub async fn list_markers() -> Result<Vec<MarkerInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Marker;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let markers: Vec<Marker> =
        sqlx::query_as("SELECT * FROM markers ORDER BY created_at ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(markers.iter().map(|m| m.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/markers")]
pub async fn list_markers() -> Result<Vec<MarkerInfo>, ServerFnError> {
    Ok(Vec::new())
}

/// Persist a newly created marker. The id is the client-generated UUID.
#[cfg(feature = "server")]
#[post("/api/markers", session: tower_sessions::Session)]
pub async fn create_marker(marker: MarkerInfo) -> Result<MarkerInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Marker;

    let user_id = require_user(&session).await?;

    let marker_id = uuid::Uuid::parse_str(&marker.id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let row: Marker = sqlx::query_as(
        "INSERT INTO markers (id, lat, lng, description, image_url, created_by)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(marker_id)
    .bind(marker.lat)
    .bind(marker.lng)
    .bind(&marker.description)
    .bind(&marker.image_url)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(row.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/markers")]
pub async fn create_marker(marker: MarkerInfo) -> Result<MarkerInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Overwrite a marker record in full (last write wins, no version token).
#[cfg(feature = "server")]
#[post("/api/markers/update", session: tower_sessions::Session)]
pub async fn update_marker(marker: MarkerInfo) -> Result<MarkerInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Marker;

    require_user(&session).await?;

    let marker_id = uuid::Uuid::parse_str(&marker.id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let row: Option<Marker> = sqlx::query_as(
        "UPDATE markers
         SET lat = $2, lng = $3, description = $4, image_url = $5, updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(marker_id)
    .bind(marker.lat)
    .bind(marker.lng)
    .bind(&marker.description)
    .bind(&marker.image_url)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(row) = row else {
        return Err(ServerFnError::new("Unknown marker"));
    };

    Ok(row.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/markers/update")]
pub async fn update_marker(marker: MarkerInfo) -> Result<MarkerInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a marker row. Objects uploaded for it stay in the object store.
#[cfg(feature = "server")]
#[post("/api/markers/delete", session: tower_sessions::Session)]
pub async fn delete_marker(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    require_user(&session).await?;

    let marker_id =
        uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM markers WHERE id = $1")
        .bind(marker_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Unknown marker"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/markers/delete")]
pub async fn delete_marker(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Upload an image for a marker and record its durable URL on the row.
///
/// The object is stored at `markers/<id>/<filename>`; the updated record is
/// returned so the client can mirror the URL into its board.
#[cfg(feature = "server")]
#[post("/api/markers/image", session: tower_sessions::Session)]
pub async fn attach_marker_image(
    id: String,
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
) -> Result<MarkerInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Marker;
    use crate::storage::{get_storage, marker_image_key};

    require_user(&session).await?;

    let marker_id =
        uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let key = marker_image_key(&id, &filename);
    let storage = get_storage()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let url = storage
        .put_image(&key, &content_type, bytes)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let row: Option<Marker> = sqlx::query_as(
        "UPDATE markers SET image_url = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(marker_id)
    .bind(&url)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(row) = row else {
        return Err(ServerFnError::new("Unknown marker"));
    };

    Ok(row.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/markers/image")]
pub async fn attach_marker_image(
    id: String,
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
) -> Result<MarkerInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
