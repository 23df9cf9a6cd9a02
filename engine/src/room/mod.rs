//! Room Module
//!
//! Room-relative placement for the 2D plan:
//! - Room geometry from outer dimensions and wall thickness
//! - Plan / world coordinate transforms
//! - Corner table and corner-unit detection
//! - The placement engine (corner lock, wall snap, clamping)

pub mod config;
pub mod corners;
pub mod geometry;
pub mod placement;

pub use config::PlacementConfig;
pub use corners::{CORNER_ZONES, CornerZone, RoomCorner, Wall, is_corner_component};
pub use geometry::{DEFAULT_CORNER_TOLERANCE, RoomDimensions, RoomGeometry, WallFace, WallFaces};
pub use placement::{PlacementBounds, PlacementEngine, PlacementError, PlacementResult};
