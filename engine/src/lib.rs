//! RightFit Layout Library
//!
//! The computational kernel behind the kitchen/room designer: formula-driven
//! parametric 3D models and room-aware placement of components on the 2D plan.
//! Everything here is synchronous and side-effect free apart from `tracing`
//! diagnostics; no subscriber is installed.
//!
//! # Modules
//!
//! - [`formula`] - Safe arithmetic formulas over named variables
//! - [`model`] - Geometry parts, materials, primitives, and the model builder
//! - [`room`] - Room geometry, coordinate transforms, and the placement engine
//!
//! # Example
//!
//! ```ignore
//! use rightfit_layout::model::{BuildContext, GeometryPart, MaterialRegistry, build_model};
//! use rightfit_layout::room::{PlacementConfig, PlacementEngine, RoomDimensions, RoomGeometry};
//! use glam::Vec2;
//!
//! // Build a cabinet model for a 60 x 90 x 60 cm element
//! let parts: Vec<GeometryPart> = serde_json::from_str(catalog_json)?;
//! let model = build_model(&parts, &MaterialRegistry::new(), &BuildContext::new(60.0, 90.0, 60.0));
//! for skipped in model.skipped() {
//!     // Missing parts are reported, not fatal
//! }
//!
//! // Place it in a 600 x 400 cm room
//! let room = RoomGeometry::from_dimensions(&RoomDimensions::new(620.0, 420.0, 250.0, 10.0));
//! let engine = PlacementEngine::new(room, PlacementConfig::default());
//! let placed = engine.calculate_placement(Vec2::new(20.0, 150.0), Vec2::new(60.0, 60.0), "base-cabinet-60");
//! ```

pub mod formula;
pub mod model;
pub mod room;

// Re-export the most used entry points at crate level
pub use formula::{Formula, FormulaError, FormulaEvaluator, Variables, evaluate};
pub use model::{BuildContext, BuiltModel, GeometryPart, MaterialRegistry, ModelBuilder, build_model};
pub use room::{PlacementConfig, PlacementEngine, PlacementResult, RoomCorner, RoomGeometry};
