//! Room Corners
//!
//! The four inner corners of a room, the walls they join, and the fixed
//! corner placement table used when an L-shaped corner unit is dropped near
//! one of them.
//!
//! Plan coordinates have their origin at the inner top-left corner, x to the
//! right and y down, so "top" is the y = 0 wall.

use serde::{Deserialize, Serialize};

/// One of the four inner walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// One of the four inner corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomCorner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl RoomCorner {
    /// Canonical name, e.g. `top-left`.
    pub fn as_str(self) -> &'static str {
        match self {
            RoomCorner::TopLeft => "top-left",
            RoomCorner::TopRight => "top-right",
            RoomCorner::BottomRight => "bottom-right",
            RoomCorner::BottomLeft => "bottom-left",
        }
    }

    /// The horizontal wall and the vertical wall meeting at this corner.
    pub fn adjacent_walls(self) -> [Wall; 2] {
        match self {
            RoomCorner::TopLeft => [Wall::Top, Wall::Left],
            RoomCorner::TopRight => [Wall::Top, Wall::Right],
            RoomCorner::BottomRight => [Wall::Bottom, Wall::Right],
            RoomCorner::BottomLeft => [Wall::Bottom, Wall::Left],
        }
    }

    /// True for corners on the left wall.
    pub fn is_left(self) -> bool {
        matches!(self, RoomCorner::TopLeft | RoomCorner::BottomLeft)
    }

    /// True for corners on the top wall.
    pub fn is_top(self) -> bool {
        matches!(self, RoomCorner::TopLeft | RoomCorner::TopRight)
    }

    /// Corner from which-side flags.
    pub fn from_sides(left: bool, top: bool) -> Self {
        match (left, top) {
            (true, true) => RoomCorner::TopLeft,
            (false, true) => RoomCorner::TopRight,
            (false, false) => RoomCorner::BottomRight,
            (true, false) => RoomCorner::BottomLeft,
        }
    }
}

impl std::fmt::Display for RoomCorner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A corner placement rule: which corner, and the rotation that turns the
/// L-shaped unit's opening toward the room interior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerZone {
    pub corner: RoomCorner,
    pub rotation_degrees: f32,
}

/// Corner zones in evaluation order. The first matching zone wins.
///
/// Diagonal corners carry mirrored rotations (0/180 and 270/90).
pub const CORNER_ZONES: [CornerZone; 4] = [
    CornerZone { corner: RoomCorner::TopLeft, rotation_degrees: 0.0 },
    CornerZone { corner: RoomCorner::TopRight, rotation_degrees: 270.0 },
    CornerZone { corner: RoomCorner::BottomRight, rotation_degrees: 180.0 },
    CornerZone { corner: RoomCorner::BottomLeft, rotation_degrees: 90.0 },
];

/// Whether a catalog component is an L-shaped corner unit, judged by its id
/// (`corner-base-cabinet`, `larder-corner`, `corner-larder`, ...).
pub fn is_corner_component(component_id: &str) -> bool {
    component_id.to_ascii_lowercase().contains("corner")
}
