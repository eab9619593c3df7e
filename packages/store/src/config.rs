//! Map view configuration.
//!
//! Compiled-in defaults for the initial camera and the geolocation policy.
//! All fields carry serde defaults so a partial override deserializes into a
//! complete config.

use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Initial camera and geolocation policy for the map view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Camera center used until (and unless) geolocation answers.
    #[serde(default = "default_center")]
    pub center: Position,
    /// Initial zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// How long to wait for the browser geolocation answer before keeping
    /// the fallback center.
    #[serde(default = "default_geolocation_timeout_secs")]
    pub geolocation_timeout_secs: u32,
}

fn default_center() -> Position {
    Position::new(-33.860664, 151.208138)
}

fn default_zoom() -> f64 {
    13.0
}

fn default_geolocation_timeout_secs() -> u32 {
    5
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            geolocation_timeout_secs: default_geolocation_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: MapConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.geolocation_timeout_secs, 5);
    }
}
