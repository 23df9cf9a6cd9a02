//! Room Geometry
//!
//! Inner bounds and wall faces derived from a room's outer dimensions, plus
//! the transforms between 2D plan coordinates and 3D world positions.
//!
//! ## Coordinate systems
//! - Plan: centimeters, origin at the inner top-left corner, x right, y down
//!   (toward the back wall).
//! - World: meters, origin at the room center on the floor, Y up. Plan y maps
//!   to world z.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::corners::{CORNER_ZONES, RoomCorner, Wall};

/// Default tolerance for position-based corner detection (cm).
pub const DEFAULT_CORNER_TOLERANCE: f32 = 30.0;

/// Outer room dimensions as stored by the room-state provider (centimeters).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f32,
    pub depth: f32,
    #[serde(default = "default_ceiling_height")]
    pub ceiling_height: f32,
    #[serde(default)]
    pub wall_thickness: f32,
}

fn default_ceiling_height() -> f32 {
    250.0
}

impl RoomDimensions {
    pub fn new(width: f32, depth: f32, ceiling_height: f32, wall_thickness: f32) -> Self {
        Self {
            width,
            depth,
            ceiling_height,
            wall_thickness,
        }
    }
}

/// Inner and outer face of one wall along its axis (cm, plan coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WallFace {
    /// Face toward the room interior.
    pub inner: f32,
    /// Face toward the outside.
    pub outer: f32,
}

/// Wall faces for all four walls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WallFaces {
    pub left: WallFace,
    pub right: WallFace,
    pub top: WallFace,
    pub bottom: WallFace,
}

impl WallFaces {
    pub fn get(&self, wall: Wall) -> WallFace {
        match wall {
            Wall::Left => self.left,
            Wall::Right => self.right,
            Wall::Top => self.top,
            Wall::Bottom => self.bottom,
        }
    }
}

/// Read-only room configuration for placement and transforms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RoomGeometry {
    /// Inner width (x) and depth (y) in centimeters.
    pub inner: Vec2,
    pub ceiling_height: f32,
    pub wall_thickness: f32,
    pub walls: WallFaces,
}

impl RoomGeometry {
    /// Derive inner bounds from outer dimensions: `inner = outer - 2 * wall_thickness`.
    pub fn from_dimensions(dimensions: &RoomDimensions) -> Self {
        let t = dimensions.wall_thickness;
        let inner = Vec2::new(dimensions.width - 2.0 * t, dimensions.depth - 2.0 * t);
        Self::build(inner, dimensions.ceiling_height, t)
    }

    /// Room with the given inner bounds and zero-thickness walls.
    pub fn from_inner(width: f32, depth: f32) -> Self {
        Self::build(Vec2::new(width, depth), default_ceiling_height(), 0.0)
    }

    fn build(inner: Vec2, ceiling_height: f32, wall_thickness: f32) -> Self {
        let face = |inner: f32, outward: f32| WallFace {
            inner,
            outer: inner + outward * wall_thickness,
        };
        Self {
            inner,
            ceiling_height,
            wall_thickness,
            walls: WallFaces {
                left: face(0.0, -1.0),
                right: face(inner.x, 1.0),
                top: face(0.0, -1.0),
                bottom: face(inner.y, 1.0),
            },
        }
    }

    pub fn inner_width(&self) -> f32 {
        self.inner.x
    }

    pub fn inner_depth(&self) -> f32 {
        self.inner.y
    }

    /// True when the inner bounds are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.inner.is_finite() && self.inner.x > 0.0 && self.inner.y > 0.0
    }

    /// Whether a footprint at `position` (its top-left) lies inside the inner
    /// bounds with at least `clearance` to every wall face.
    pub fn contains_footprint(&self, position: Vec2, size: Vec2, clearance: f32) -> bool {
        position.x >= clearance
            && position.y >= clearance
            && position.x + size.x <= self.inner.x - clearance
            && position.y + size.y <= self.inner.y - clearance
    }

    /// Plan position (cm; `z` is elevation off the floor) to world meters,
    /// with Y at the vertical center of an element `element_height` cm tall.
    pub fn plan_to_world(&self, plan: Vec3, element_height: f32) -> Vec3 {
        let half = self.inner / 200.0;
        Vec3::new(
            -half.x + plan.x / 100.0,
            plan.z / 100.0 + element_height / 200.0,
            -half.y + plan.y / 100.0,
        )
    }

    /// Inverse of [`RoomGeometry::plan_to_world`].
    pub fn world_to_plan(&self, world: Vec3, element_height: f32) -> Vec3 {
        let half = self.inner / 200.0;
        Vec3::new(
            (world.x + half.x) * 100.0,
            (world.z + half.y) * 100.0,
            (world.y - element_height / 200.0) * 100.0,
        )
    }

    /// Corner a placed footprint sits in, if its top-left is within
    /// `tolerance` of both adjacent walls (measuring the far edge on the
    /// right and bottom walls).
    pub fn detect_corner_position(
        &self,
        position: Vec2,
        size: Vec2,
        tolerance: f32,
    ) -> Option<RoomCorner> {
        let near_left = position.x <= tolerance;
        let near_right = position.x >= self.inner.x - size.x - tolerance;
        let near_top = position.y <= tolerance;
        let near_bottom = position.y >= self.inner.y - size.y - tolerance;
        Self::corner_from(near_left, near_right, near_top, near_bottom)
    }

    /// Corner a single point is in, if it is within `tolerance` of two
    /// adjacent walls.
    pub fn is_corner_position(&self, point: Vec2, tolerance: f32) -> Option<RoomCorner> {
        self.detect_corner_position(point, Vec2::ZERO, tolerance)
    }

    fn corner_from(left: bool, right: bool, top: bool, bottom: bool) -> Option<RoomCorner> {
        CORNER_ZONES.iter().map(|z| z.corner).find(|c| {
            let horizontal = if c.is_left() { left } else { right };
            let vertical = if c.is_top() { top } else { bottom };
            horizontal && vertical
        })
    }
}
