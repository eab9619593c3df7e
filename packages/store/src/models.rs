//! Domain models for points of interest.
//!
//! These types are `Serialize + Deserialize` so they can cross the
//! server/client boundary via Dioxus server functions and be handed to the
//! map widget bridge as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a point of interest.
///
/// Generated client-side as a UUID v4, so allocation never depends on the
/// current in-memory collection and a mid-session reload cannot produce a
/// colliding id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(String);

impl MarkerId {
    /// Allocate a fresh id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MarkerId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for MarkerId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A user-created record of a location plus optional description and image.
///
/// `image_url` is set only after the corresponding object has been uploaded
/// to the object store; a record with a URL always has a stored object at a
/// key derived from its id (the inverse is not guaranteed).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: MarkerId,
    pub position: Position,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl PointOfInterest {
    /// A freshly dropped pin: no description, no image.
    pub fn new(id: MarkerId, position: Position) -> Self {
        Self {
            id,
            position,
            description: None,
            image_url: None,
        }
    }
}
