//! Placement Configuration
//!
//! Distances used by the placement engine, all in centimeters.

use serde::{Deserialize, Serialize};

/// Placement tuning.
///
/// The defaults are the values the canvas has always used; a room-state
/// provider may load an override from JSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Gap kept between a component and every inner wall face.
    pub wall_clearance: f32,
    /// Maximum wall distance at which a drop snaps to that wall.
    pub snap_threshold: f32,
    /// Distance from a room corner, along both axes, that triggers corner placement.
    pub corner_threshold: f32,
    /// Square footprint used for corner components regardless of nominal size.
    pub corner_footprint: f32,
    /// Margin used by the degraded fallback clamp.
    pub fallback_margin: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            wall_clearance: 5.0,
            snap_threshold: 40.0,
            corner_threshold: 40.0,
            corner_footprint: 90.0,
            fallback_margin: 5.0,
        }
    }
}

impl PlacementConfig {
    /// Parse a config from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
