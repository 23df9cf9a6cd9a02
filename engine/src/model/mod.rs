//! Model Module
//!
//! Parametric 3D models assembled from catalog geometry parts:
//! - Part and material records as supplied by the catalog
//! - Appearance resolution (color roles, material defaults)
//! - Primitive shapes with bounding boxes and mesh generation
//! - The builder that evaluates formulas per element size

pub mod builder;
pub mod material;
pub mod part;
pub mod primitive;

pub use builder::{
    BuildContext, BuiltModel, DEFAULT_DIMENSION, DEFAULT_POSITION, ModelBuilder, PartDiagnostic,
    SkipReason, build_model,
};
pub use material::{
    Appearance, DEFAULT_COLOR, MaterialDefinition, MaterialRegistry, MaterialType, Shading,
    parse_hex_color, resolve_appearance,
};
pub use part::{ColorOverride, ColorRole, GeometryPart, PartType};
pub use primitive::{AABB, Primitive, PrimitiveShape, PrimitiveVertex};
