//! Marker model: the durable row and its wire projection.
//!
//! [`Marker`] is the `markers` row (server only). [`MarkerInfo`] is the
//! record that crosses the server/client boundary and converts to/from the
//! client-side [`store::PointOfInterest`]. The row's `created_by` and audit
//! timestamps stay on the server.

use serde::{Deserialize, Serialize};
use store::{MarkerId, PointOfInterest, Position};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full marker record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Marker {
    pub id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Marker {
    /// Convert to MarkerInfo for client consumption.
    pub fn to_info(&self) -> MarkerInfo {
        MarkerInfo {
            id: self.id.to_string(),
            lat: self.lat,
            lng: self.lng,
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Marker fields safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerInfo {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl MarkerInfo {
    /// View this record as the client-side domain type.
    pub fn into_point(self) -> PointOfInterest {
        PointOfInterest {
            id: MarkerId::from(self.id),
            position: Position::new(self.lat, self.lng),
            description: self.description,
            image_url: self.image_url,
        }
    }

    /// Build the wire record for a client-side point of interest.
    pub fn from_point(point: &PointOfInterest) -> Self {
        Self {
            id: point.id.to_string(),
            lat: point.position.lat,
            lng: point.position.lng,
            description: point.description.clone(),
            image_url: point.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_record_mirrors_the_point() {
        let point = PointOfInterest {
            id: MarkerId::from("m1"),
            position: Position::new(41.0, 12.0),
            description: Some("forum".into()),
            image_url: None,
        };

        let info = MarkerInfo::from_point(&point);
        assert_eq!(info.lat, 41.0);
        assert_eq!(info.lng, 12.0);
        assert_eq!(info.into_point(), point);
    }
}
