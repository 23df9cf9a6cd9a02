//! Placement Engine
//!
//! Decides where a component dropped on the 2D plan actually lands:
//! 1. Corner units take a fixed 90x90 footprint
//! 2. Corner units dropped near a room corner lock into that corner
//! 3. Otherwise, drops near a wall snap flush to it and face the room
//! 4. The result is clamped so the footprint stays inside the room
//!
//! [`PlacementEngine::calculate_placement`] never fails. Internal problems
//! (degenerate room, bad footprint, non-finite drop) degrade to a plain
//! margin clamp.
//!
//! ```ignore
//! let engine = PlacementEngine::new(RoomGeometry::from_inner(400.0, 600.0), PlacementConfig::default());
//! let result = engine.calculate_placement(Vec2::new(10.0, 10.0), Vec2::new(60.0, 60.0), "corner-base-cabinet");
//! assert_eq!(result.corner, Some(RoomCorner::TopLeft));
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::config::PlacementConfig;
use super::corners::{CORNER_ZONES, CornerZone, RoomCorner, is_corner_component};
use super::geometry::RoomGeometry;

/// Reasons the strict placement path refuses to compute a placement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("room inner bounds {width} x {depth} are not a usable size")]
    InvalidRoom { width: f32, depth: f32 },

    #[error("component footprint {width} x {depth} is not a positive finite size")]
    InvalidFootprint { width: f32, depth: f32 },

    #[error("drop point ({x}, {y}) is not finite")]
    NonFiniteDrop { x: f32, y: f32 },
}

/// Where a dropped component ends up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    /// Top-left of the footprint, plan cm.
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
    pub snapped_to_wall: bool,
    pub corner: Option<RoomCorner>,
    /// Whether the footprint lies inside the inner bounds minus wall clearance.
    pub within_bounds: bool,
}

impl PlacementResult {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Allowed range for a footprint's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlacementBounds {
    /// Clamp into the bounds. Uses `max(min, min(max, v))` so an inverted
    /// range (footprint wider than the room) resolves to `min`.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.min.x.max(self.max.x.min(point.x)),
            self.min.y.max(self.max.y.min(point.y)),
        )
    }
}

/// Result of the wall-snap pass, before the final clamp.
#[derive(Debug, Clone, Copy)]
struct WallSnap {
    position: Vec2,
    rotation_degrees: Option<f32>,
    snapped: bool,
}

/// Placement against one room configuration.
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine {
    room: RoomGeometry,
    config: PlacementConfig,
}

impl PlacementEngine {
    pub fn new(room: RoomGeometry, config: PlacementConfig) -> Self {
        Self { room, config }
    }

    pub fn room(&self) -> &RoomGeometry {
        &self.room
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Footprint used for placement: corner units are always a fixed square.
    pub fn effective_footprint(&self, footprint: Vec2, component_id: &str) -> Vec2 {
        if is_corner_component(component_id) {
            Vec2::splat(self.config.corner_footprint)
        } else {
            footprint
        }
    }

    /// Range of top-left positions that keep `footprint` inside the room
    /// with wall clearance on every side.
    pub fn placement_bounds(&self, footprint: Vec2) -> PlacementBounds {
        let clearance = Vec2::splat(self.config.wall_clearance);
        PlacementBounds {
            min: clearance,
            max: self.room.inner - footprint - clearance,
        }
    }

    /// Whether a footprint at `position` fits inside the room with wall clearance.
    pub fn validate_placement(&self, position: Vec2, footprint: Vec2) -> bool {
        self.room
            .contains_footprint(position, footprint, self.config.wall_clearance)
    }

    /// Place a dropped component. Always returns a result; see
    /// [`PlacementEngine::try_calculate_placement`] for the strict variant.
    pub fn calculate_placement(
        &self,
        drop_point: Vec2,
        footprint: Vec2,
        component_id: &str,
    ) -> PlacementResult {
        match self.try_calculate_placement(drop_point, footprint, component_id) {
            Ok(result) => result,
            Err(err) => {
                warn!(component = component_id, error = %err, "placement failed, using fallback clamp");
                self.fallback_placement(drop_point, self.effective_footprint(footprint, component_id))
            }
        }
    }

    /// Place a dropped component, reporting unusable input instead of
    /// degrading.
    pub fn try_calculate_placement(
        &self,
        drop_point: Vec2,
        footprint: Vec2,
        component_id: &str,
    ) -> Result<PlacementResult, PlacementError> {
        if !self.room.is_valid() {
            return Err(PlacementError::InvalidRoom {
                width: self.room.inner.x,
                depth: self.room.inner.y,
            });
        }
        if !drop_point.is_finite() {
            return Err(PlacementError::NonFiniteDrop {
                x: drop_point.x,
                y: drop_point.y,
            });
        }

        let is_corner = is_corner_component(component_id);
        let footprint = self.effective_footprint(footprint, component_id);
        if !footprint.is_finite() || footprint.cmple(Vec2::ZERO).any() {
            return Err(PlacementError::InvalidFootprint {
                width: footprint.x,
                depth: footprint.y,
            });
        }

        let bounds = self.placement_bounds(footprint);

        if is_corner {
            if let Some(result) = self.corner_placement(drop_point, footprint, &bounds) {
                debug!(
                    component = component_id,
                    corner = %result.corner.map_or("none", RoomCorner::as_str),
                    x = result.x,
                    y = result.y,
                    rotation = result.rotation_degrees,
                    "corner placement"
                );
                return Ok(result);
            }
        }

        let snap = self.wall_snap(drop_point, footprint, &bounds);
        let position = bounds.clamp(snap.position);
        let within_bounds = self.validate_placement(position, footprint);

        debug!(
            component = component_id,
            x = position.x,
            y = position.y,
            snapped = snap.snapped,
            within_bounds,
            "final placement"
        );

        Ok(PlacementResult {
            x: position.x,
            y: position.y,
            rotation_degrees: snap.rotation_degrees.unwrap_or(0.0),
            snapped_to_wall: snap.snapped,
            corner: None,
            within_bounds,
        })
    }

    /// First corner zone (in table order) whose threshold box contains the drop.
    fn corner_placement(
        &self,
        drop_point: Vec2,
        footprint: Vec2,
        bounds: &PlacementBounds,
    ) -> Option<PlacementResult> {
        let threshold = self.config.corner_threshold;
        let far = bounds.max + footprint - Vec2::splat(threshold);

        let zone_matches = |zone: &CornerZone| {
            let horizontal = if zone.corner.is_left() {
                drop_point.x <= threshold
            } else {
                drop_point.x >= far.x
            };
            let vertical = if zone.corner.is_top() {
                drop_point.y <= threshold
            } else {
                drop_point.y >= far.y
            };
            horizontal && vertical
        };

        let zone = CORNER_ZONES.iter().find(|z| zone_matches(*z))?;
        let position = Vec2::new(
            if zone.corner.is_left() { bounds.min.x } else { bounds.max.x },
            if zone.corner.is_top() { bounds.min.y } else { bounds.max.y },
        );

        Some(PlacementResult {
            x: position.x,
            y: position.y,
            rotation_degrees: zone.rotation_degrees,
            snapped_to_wall: true,
            corner: Some(zone.corner),
            within_bounds: self.validate_placement(position, footprint),
        })
    }

    /// Snap each axis to the nearer qualifying wall. The horizontal axis is
    /// evaluated first; the vertical axis only sets a rotation if none is set.
    fn wall_snap(&self, drop_point: Vec2, footprint: Vec2, bounds: &PlacementBounds) -> WallSnap {
        let threshold = self.config.snap_threshold;
        let walls = &self.room.walls;
        let in_range = |clearance: f32| (0.0..=threshold).contains(&clearance);

        let mut snap = WallSnap {
            position: drop_point,
            rotation_degrees: None,
            snapped: false,
        };

        let left = drop_point.x - walls.left.inner;
        let right = walls.right.inner - (drop_point.x + footprint.x);
        if in_range(left) {
            snap.position.x = bounds.min.x;
            snap.rotation_degrees = Some(0.0);
            snap.snapped = true;
        } else if in_range(right) {
            snap.position.x = bounds.max.x;
            snap.rotation_degrees = Some(180.0);
            snap.snapped = true;
        }

        let top = drop_point.y - walls.top.inner;
        let bottom = walls.bottom.inner - (drop_point.y + footprint.y);
        if in_range(top) {
            snap.position.y = bounds.min.y;
            snap.rotation_degrees.get_or_insert(0.0);
            snap.snapped = true;
        } else if in_range(bottom) {
            snap.position.y = bounds.max.y;
            snap.rotation_degrees.get_or_insert(180.0);
            snap.snapped = true;
        }

        snap
    }

    /// Degraded result: the raw drop clamped into a margin-only bound.
    fn fallback_placement(&self, drop_point: Vec2, footprint: Vec2) -> PlacementResult {
        let margin = self.config.fallback_margin;
        let max = self.room.inner - footprint - Vec2::splat(margin);
        let x = margin.max(max.x.min(drop_point.x));
        let y = margin.max(max.y.min(drop_point.y));

        PlacementResult {
            x,
            y,
            rotation_degrees: 0.0,
            snapped_to_wall: false,
            corner: None,
            within_bounds: self.validate_placement(Vec2::new(x, y), footprint),
        }
    }
}
