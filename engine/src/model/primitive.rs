//! Renderable Primitives
//!
//! The closed set of shapes the model builder emits. Each primitive has:
//! - An axis-aligned bounding box for diagnostics
//! - Indexed mesh generation for the rendering collaborator
//! - A vertex count that matches the generated mesh without building it
//!
//! # Shapes
//!
//! - **Box**: full width / height / depth, centered on the position
//! - **Cylinder**: vertical, radius + height, at least 8 radial segments
//! - **Sphere**: radius, at least 8 width and 6 height segments
//!
//! Segment counts derived from formulas are capped at [`MAX_SEGMENTS`].

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::Serialize;
use std::f32::consts::PI;

use super::material::Appearance;

/// Minimum radial segments for cylinders.
pub const MIN_CYLINDER_SEGMENTS: u32 = 8;
/// Minimum longitudinal segments for spheres.
pub const MIN_SPHERE_WIDTH_SEGMENTS: u32 = 8;
/// Minimum latitudinal segments for spheres.
pub const MIN_SPHERE_HEIGHT_SEGMENTS: u32 = 6;
/// Upper bound for any formula-derived segment count.
pub const MAX_SEGMENTS: u32 = 256;

// ============================================================================
// SHAPE ENUM AND PRIMITIVE STRUCT
// ============================================================================

/// Geometry of a primitive, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrimitiveShape {
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32, radial_segments: u32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
}

/// Turn an evaluated formula value into a segment count in `min..=MAX_SEGMENTS`.
pub fn segments_from(value: f32, min: u32) -> u32 {
    let count = if value.is_finite() && value > 0.0 {
        value.floor() as u32
    } else {
        0
    };
    count.clamp(min.min(MAX_SEGMENTS), MAX_SEGMENTS)
}

impl PrimitiveShape {
    /// Half-size of the shape's bounding box.
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            PrimitiveShape::Box { width, height, depth } => {
                Vec3::new(width, height, depth).abs() * 0.5
            }
            PrimitiveShape::Cylinder { radius, height, .. } => {
                Vec3::new(radius.abs(), height.abs() * 0.5, radius.abs())
            }
            PrimitiveShape::Sphere { radius, .. } => Vec3::splat(radius.abs()),
        }
    }

    /// Number of vertices [`Primitive::generate_mesh`] produces for this shape.
    pub fn vertex_count(&self) -> usize {
        match *self {
            PrimitiveShape::Box { .. } => 24,
            // Side ring pairs (s + 1) * 2, plus a center and s ring vertices per cap.
            PrimitiveShape::Cylinder { radial_segments, .. } => {
                (radial_segments as usize).saturating_mul(4).saturating_add(4)
            }
            PrimitiveShape::Sphere { width_segments, height_segments, .. } => {
                (width_segments as usize)
                    .saturating_add(1)
                    .saturating_mul((height_segments as usize).saturating_add(1))
            }
        }
    }
}

/// A positioned, colored primitive produced from one geometry part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    /// Part name, for diagnostics.
    pub name: String,
    pub render_order: i32,
    pub shape: PrimitiveShape,
    /// Center of the primitive in model space (meters).
    pub position: Vec3,
    pub appearance: Appearance,
}

impl Primitive {
    /// Axis-aligned bounding box in model space.
    pub fn aabb(&self) -> AABB {
        let half = self.shape.half_extents();
        AABB::new(self.position - half, self.position + half)
    }

    pub fn vertex_count(&self) -> usize {
        self.shape.vertex_count()
    }

    /// Generate mesh vertices and indices for this primitive.
    pub fn generate_mesh(&self) -> (Vec<PrimitiveVertex>, Vec<u32>) {
        let color = self.appearance.rgba();
        match self.shape {
            PrimitiveShape::Box { width, height, depth } => {
                mesh_box(self.position, Vec3::new(width, height, depth) * 0.5, color)
            }
            PrimitiveShape::Cylinder { radius, height, radial_segments } => {
                mesh_cylinder(self.position, radius, height, radial_segments, color)
            }
            PrimitiveShape::Sphere { radius, width_segments, height_segments } => {
                mesh_sphere(self.position, radius, width_segments, height_segments, color)
            }
        }
    }
}

// ============================================================================
// AABB (Axis-Aligned Bounding Box)
// ============================================================================

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Check if a point is inside the AABB
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &AABB) -> AABB {
        AABB::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size/extents of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

// ============================================================================
// VERTEX FORMAT
// ============================================================================

/// Vertex for primitive meshes
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable, Debug, PartialEq)]
pub struct PrimitiveVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl PrimitiveVertex {
    pub fn new(position: Vec3, normal: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }
}

// ============================================================================
// MESH GENERATION
// ============================================================================

fn mesh_box(position: Vec3, half_extents: Vec3, color: [f32; 4]) -> (Vec<PrimitiveVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    // Face data: (normal, corners in unit-cube space)
    let faces = [
        (Vec3::X, [
            Vec3::new( 1.0, -1.0, -1.0),
            Vec3::new( 1.0,  1.0, -1.0),
            Vec3::new( 1.0,  1.0,  1.0),
            Vec3::new( 1.0, -1.0,  1.0),
        ]),
        (Vec3::NEG_X, [
            Vec3::new(-1.0, -1.0,  1.0),
            Vec3::new(-1.0,  1.0,  1.0),
            Vec3::new(-1.0,  1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
        ]),
        (Vec3::Y, [
            Vec3::new(-1.0,  1.0, -1.0),
            Vec3::new(-1.0,  1.0,  1.0),
            Vec3::new( 1.0,  1.0,  1.0),
            Vec3::new( 1.0,  1.0, -1.0),
        ]),
        (Vec3::NEG_Y, [
            Vec3::new(-1.0, -1.0,  1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new( 1.0, -1.0, -1.0),
            Vec3::new( 1.0, -1.0,  1.0),
        ]),
        (Vec3::Z, [
            Vec3::new(-1.0, -1.0,  1.0),
            Vec3::new( 1.0, -1.0,  1.0),
            Vec3::new( 1.0,  1.0,  1.0),
            Vec3::new(-1.0,  1.0,  1.0),
        ]),
        (Vec3::NEG_Z, [
            Vec3::new( 1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0,  1.0, -1.0),
            Vec3::new( 1.0,  1.0, -1.0),
        ]),
    ];

    for (normal, face_verts) in faces {
        let base_idx = vertices.len() as u32;
        for v in face_verts {
            vertices.push(PrimitiveVertex::new(position + v * half_extents, normal, color));
        }
        // Two triangles per face
        indices.extend_from_slice(&[
            base_idx, base_idx + 1, base_idx + 2,
            base_idx, base_idx + 2, base_idx + 3,
        ]);
    }

    (vertices, indices)
}

fn mesh_cylinder(
    position: Vec3,
    radius: f32,
    height: f32,
    segments: u32,
    color: [f32; 4],
) -> (Vec<PrimitiveVertex>, Vec<u32>) {
    let half_height = height * 0.5;
    let mut vertices = Vec::with_capacity(segments as usize * 4 + 4);
    let mut indices = Vec::new();

    let ring_point = |i: u32| {
        let angle = (i as f32 / segments as f32) * PI * 2.0;
        (angle.cos(), angle.sin())
    };

    // Side
    for i in 0..=segments {
        let (c, s) = ring_point(i);
        let normal = Vec3::new(c, 0.0, s);
        vertices.push(PrimitiveVertex::new(
            position + Vec3::new(c * radius, -half_height, s * radius),
            normal,
            color,
        ));
        vertices.push(PrimitiveVertex::new(
            position + Vec3::new(c * radius, half_height, s * radius),
            normal,
            color,
        ));
    }
    for i in 0..segments {
        let base = i * 2;
        indices.extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
    }

    // Caps: top winds counter-clockwise seen from +Y, bottom reversed.
    for (y, normal, flip) in [(half_height, Vec3::Y, false), (-half_height, Vec3::NEG_Y, true)] {
        let center_idx = vertices.len() as u32;
        vertices.push(PrimitiveVertex::new(position + Vec3::new(0.0, y, 0.0), normal, color));

        let ring_start = vertices.len() as u32;
        for i in 0..segments {
            let (c, s) = ring_point(i);
            vertices.push(PrimitiveVertex::new(
                position + Vec3::new(c * radius, y, s * radius),
                normal,
                color,
            ));
        }
        for i in 0..segments {
            let next = (i + 1) % segments;
            if flip {
                indices.extend_from_slice(&[center_idx, ring_start + i, ring_start + next]);
            } else {
                indices.extend_from_slice(&[center_idx, ring_start + next, ring_start + i]);
            }
        }
    }

    (vertices, indices)
}

fn mesh_sphere(
    position: Vec3,
    radius: f32,
    segments: u32,
    rings: u32,
    color: [f32; 4],
) -> (Vec<PrimitiveVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity((segments as usize + 1) * (rings as usize + 1));
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = (ring as f32 / rings as f32) * PI;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=segments {
            let theta = (seg as f32 / segments as f32) * PI * 2.0;
            let normal = Vec3::new(ring_radius * theta.cos(), y, ring_radius * theta.sin());
            vertices.push(PrimitiveVertex::new(position + normal * radius, normal, color));
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * stride + seg;
            let next = current + stride;

            // Poles collapse to a single triangle per quad
            if ring != 0 {
                indices.extend_from_slice(&[current, next, current + 1]);
            }
            if ring != rings - 1 {
                indices.extend_from_slice(&[current + 1, next, next + 1]);
            }
        }
    }

    (vertices, indices)
}
