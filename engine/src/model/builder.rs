//! Parametric Model Builder
//!
//! Turns a list of declarative geometry parts into positioned primitives for
//! one concrete element. Failures are isolated per part: a bad formula or an
//! unsupported part type drops that part and records a diagnostic, the rest
//! of the model still builds.
//!
//! ```ignore
//! let builder = ModelBuilder::new(&parts, &materials);
//! let model = builder.build(&BuildContext::new(60.0, 90.0, 60.0).selected(true));
//! for primitive in &model.primitives {
//!     let (vertices, indices) = primitive.generate_mesh();
//! }
//! ```

use glam::Vec3;
use thiserror::Error;
use tracing::{debug, warn};

use crate::formula::{
    ElementDimensions, Formula, FormulaError, FormulaEvaluator, StandardOptions, Variables,
    evaluate_condition, flag, standard_variables,
};

use super::material::{MaterialRegistry, resolve_appearance};
use super::part::{GeometryPart, PartType};
use super::primitive::{
    AABB, MAX_SEGMENTS, MIN_CYLINDER_SEGMENTS, MIN_SPHERE_HEIGHT_SEGMENTS,
    MIN_SPHERE_WIDTH_SEGMENTS, Primitive, PrimitiveShape, PrimitiveVertex, segments_from,
};

/// Position used when a part leaves a coordinate formula empty.
pub const DEFAULT_POSITION: f32 = 0.0;
/// Size used when a part leaves a dimension formula empty, in meters.
pub const DEFAULT_DIMENSION: f32 = 0.1;

// ============================================================================
// BUILD CONTEXT
// ============================================================================

/// Per-invocation input: the element's real size and state.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Element width in centimeters.
    pub width: f32,
    /// Element height in centimeters.
    pub height: f32,
    /// Element depth in centimeters.
    pub depth: f32,
    pub is_selected: bool,
    pub is_wall_cabinet: bool,
    /// Corner leg length in meters.
    pub leg_length: Option<f32>,
    /// Corner depth in meters.
    pub corner_depth: Option<f32>,
    /// Caller overrides, applied after the standard set.
    pub custom_variables: Variables,
}

impl BuildContext {
    /// Context for an element of the given size in centimeters.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            ..Default::default()
        }
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    pub fn wall_cabinet(mut self, is_wall_cabinet: bool) -> Self {
        self.is_wall_cabinet = is_wall_cabinet;
        self
    }

    /// Set both corner parameters (meters).
    pub fn corner(mut self, leg_length: f32, corner_depth: f32) -> Self {
        self.leg_length = Some(leg_length);
        self.corner_depth = Some(corner_depth);
        self
    }

    /// Add a custom variable override.
    pub fn with_variable(mut self, name: impl Into<String>, value: f32) -> Self {
        self.custom_variables.set(name, value);
        self
    }

    /// Full variable set for formula evaluation.
    ///
    /// Standard variables first, then custom overrides, then `isSelected`.
    /// Custom `plinthHeight` / `cabinetHeight` / `doorHeight` also feed the
    /// derived defaults so `cabinetHeight` follows an overridden plinth.
    pub fn variables(&self) -> Variables {
        let custom = &self.custom_variables;
        let options = StandardOptions {
            leg_length: self.leg_length,
            corner_depth: self.corner_depth,
            plinth_height: custom.get("plinthHeight"),
            cabinet_height: custom.get("cabinetHeight"),
            door_height: custom.get("doorHeight"),
            is_wall_cabinet: self.is_wall_cabinet,
        };
        let element = ElementDimensions {
            width: self.width,
            height: self.height,
            depth: self.depth,
        };

        standard_variables(element, options)
            .merged(custom)
            .with("isSelected", flag(self.is_selected))
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Why a part produced no primitive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    /// The part's render condition evaluated to false.
    #[error("render condition `{0}` is false")]
    ConditionFalse(String),

    /// `part_type` is not one of box / cylinder / sphere.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    /// A position or dimension formula failed.
    #[error(transparent)]
    Formula(#[from] FormulaError),
}

/// Non-fatal events recorded while building.
#[derive(Debug, Clone, PartialEq)]
pub enum PartDiagnostic {
    /// The part was left out of the model.
    Skipped { part_name: String, reason: SkipReason },
    /// The referenced material is not registered; defaults were used.
    MaterialFallback { part_name: String, material_name: String },
}

impl PartDiagnostic {
    pub fn part_name(&self) -> &str {
        match self {
            PartDiagnostic::Skipped { part_name, .. }
            | PartDiagnostic::MaterialFallback { part_name, .. } => part_name,
        }
    }
}

// ============================================================================
// BUILT MODEL
// ============================================================================

/// Output of one build: primitives in render order plus diagnostics.
#[derive(Debug, Clone, Default)]
pub struct BuiltModel {
    pub primitives: Vec<Primitive>,
    pub diagnostics: Vec<PartDiagnostic>,
}

impl BuiltModel {
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// First primitive built from the part called `name`.
    pub fn primitive(&self, name: &str) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.name == name)
    }

    /// Parts that were left out, with reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.diagnostics.iter().filter_map(|d| match d {
            PartDiagnostic::Skipped { part_name, reason } => Some((part_name.as_str(), reason)),
            PartDiagnostic::MaterialFallback { .. } => None,
        })
    }

    /// Bounding box of every primitive, or `None` for an empty model.
    pub fn bounding_box(&self) -> Option<AABB> {
        self.primitives
            .iter()
            .map(Primitive::aabb)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Total vertices across all primitive meshes.
    pub fn vertex_count(&self) -> usize {
        self.primitives
            .iter()
            .map(Primitive::vertex_count)
            .fold(0, usize::saturating_add)
    }

    /// Concatenate every primitive mesh into one vertex/index buffer pair.
    ///
    /// Stops before any primitive whose indices would not fit in `u32`.
    pub fn generate_mesh(&self) -> (Vec<PrimitiveVertex>, Vec<u32>) {
        let mut vertices: Vec<PrimitiveVertex> = Vec::new();
        let mut indices = Vec::new();
        for primitive in &self.primitives {
            let end = vertices.len().saturating_add(primitive.vertex_count());
            let (Ok(base), Ok(_)) = (u32::try_from(vertices.len()), u32::try_from(end)) else {
                warn!(
                    part = %primitive.name,
                    vertices = vertices.len(),
                    "mesh exceeds u32 index range, remaining parts dropped"
                );
                break;
            };
            let (v, i) = primitive.generate_mesh();
            vertices.extend(v);
            indices.extend(i.into_iter().map(|idx| idx + base));
        }
        (vertices, indices)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds models from borrowed catalog data.
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    parts: &'a [GeometryPart],
    materials: &'a MaterialRegistry,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(parts: &'a [GeometryPart], materials: &'a MaterialRegistry) -> Self {
        Self { parts, materials }
    }

    /// Build every part for `context`. Never fails; see [`BuiltModel::diagnostics`].
    pub fn build(&self, context: &BuildContext) -> BuiltModel {
        let variables = context.variables();
        let evaluator = FormulaEvaluator::new(variables.clone());

        let mut ordered: Vec<&GeometryPart> = self.parts.iter().collect();
        ordered.sort_by_key(|p| p.render_order);

        let mut model = BuiltModel::default();
        for part in ordered {
            match self.build_part(part, &evaluator, &variables, context) {
                Ok(primitive) => {
                    if let Some(name) = self.missing_material(part) {
                        warn!(
                            part = %part.part_name,
                            material = %name,
                            "material not registered, using default appearance"
                        );
                        model.diagnostics.push(PartDiagnostic::MaterialFallback {
                            part_name: part.part_name.clone(),
                            material_name: name.to_string(),
                        });
                    }
                    model.primitives.push(primitive);
                }
                Err(reason) => {
                    match &reason {
                        SkipReason::ConditionFalse(condition) => {
                            debug!(part = %part.part_name, %condition, "skipping part");
                        }
                        other => {
                            warn!(part = %part.part_name, error = %other, "failed to build part");
                        }
                    }
                    model.diagnostics.push(PartDiagnostic::Skipped {
                        part_name: part.part_name.clone(),
                        reason,
                    });
                }
            }
        }

        debug!(
            built = model.primitives.len(),
            skipped = model.skipped().count(),
            "built model"
        );
        model
    }

    fn missing_material(&self, part: &'a GeometryPart) -> Option<&'a str> {
        let name = part.material_name.as_deref()?;
        match self.materials.get(name) {
            Some(_) => None,
            None => Some(name),
        }
    }

    fn build_part(
        &self,
        part: &GeometryPart,
        evaluator: &FormulaEvaluator,
        variables: &Variables,
        context: &BuildContext,
    ) -> Result<Primitive, SkipReason> {
        if let Some(condition) = part.render_condition.as_deref().filter(|c| !c.trim().is_empty()) {
            if !evaluate_condition(condition, variables) {
                return Err(SkipReason::ConditionFalse(condition.to_string()));
            }
        }

        let position = Vec3::new(
            eval_or(evaluator, &part.position_x, DEFAULT_POSITION)?,
            eval_or(evaluator, &part.position_y, DEFAULT_POSITION)?,
            eval_or(evaluator, &part.position_z, DEFAULT_POSITION)?,
        );
        let dims = Vec3::new(
            eval_or(evaluator, &part.dimension_width, DEFAULT_DIMENSION)?,
            eval_or(evaluator, &part.dimension_height, DEFAULT_DIMENSION)?,
            eval_or(evaluator, &part.dimension_depth, DEFAULT_DIMENSION)?,
        );

        let shape = match part.kind().map_err(SkipReason::UnsupportedGeometryType)? {
            PartType::Box => PrimitiveShape::Box {
                width: dims.x,
                height: dims.y,
                depth: dims.z,
            },
            PartType::Cylinder => PrimitiveShape::Cylinder {
                radius: dims.x,
                height: dims.y,
                radial_segments: segments_from(dims.z, MIN_CYLINDER_SEGMENTS),
            },
            PartType::Sphere => PrimitiveShape::Sphere {
                radius: dims.x,
                width_segments: segments_from(dims.y, MIN_SPHERE_WIDTH_SEGMENTS),
                height_segments: segments_from(dims.z, MIN_SPHERE_HEIGHT_SEGMENTS),
            },
        };

        let material = part.material_name.as_deref().and_then(|n| self.materials.get(n));

        Ok(Primitive {
            name: part.part_name.clone(),
            render_order: part.render_order,
            shape,
            position,
            appearance: resolve_appearance(part, material, context.is_selected),
        })
    }
}

/// Evaluate an optional formula; absent or blank formulas use `default`.
fn eval_or(
    evaluator: &FormulaEvaluator,
    formula: &Option<Formula>,
    default: f32,
) -> Result<f32, FormulaError> {
    match formula {
        None => Ok(default),
        Some(Formula::Expr(text)) if text.trim().is_empty() => Ok(default),
        Some(f) => evaluator.evaluate(f),
    }
}

/// Build `parts` for `context` in one call.
pub fn build_model(
    parts: &[GeometryPart],
    materials: &MaterialRegistry,
    context: &BuildContext,
) -> BuiltModel {
    ModelBuilder::new(parts, materials).build(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::material::{MaterialDefinition, SELECTED_COLOR};
    use approx::assert_relative_eq;

    fn registry() -> MaterialRegistry {
        [MaterialDefinition::new("cabinet", "#8B7355")].into_iter().collect()
    }

    #[test]
    fn test_context_variables_precedence() {
        let ctx = BuildContext::new(60.0, 90.0, 60.0)
            .with_variable("width", 1.5)
            .with_variable("shelfCount", 3.0)
            .selected(true);
        let vars = ctx.variables();
        assert_eq!(vars.get("width"), Some(1.5));
        assert_eq!(vars.get("shelfCount"), Some(3.0));
        assert_eq!(vars.get("isSelected"), Some(1.0));
    }

    #[test]
    fn test_custom_is_selected_is_overridden_by_flag() {
        let ctx = BuildContext::new(60.0, 90.0, 60.0).with_variable("isSelected", 1.0);
        assert_eq!(ctx.variables().get("isSelected"), Some(0.0));
    }

    #[test]
    fn test_bad_formula_skips_only_that_part() {
        let parts = vec![
            GeometryPart::new("Good", "box").with_dimensions("width", "height", "depth"),
            GeometryPart::new("Bad", "box").with_dimensions("width / 0", "1", "1"),
        ];
        let materials = registry();
        let model = ModelBuilder::new(&parts, &materials).build(&BuildContext::new(60.0, 90.0, 60.0));

        assert_eq!(model.len(), 1);
        assert!(model.primitive("Good").is_some());
        let skipped: Vec<_> = model.skipped().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0, "Bad");
        assert!(matches!(skipped[0].1, SkipReason::Formula(_)));
    }

    #[test]
    fn test_unsupported_type_is_skipped() {
        let parts = vec![GeometryPart::new("Donut", "torus")];
        let model = build_model(&parts, &registry(), &BuildContext::new(60.0, 90.0, 60.0));
        assert!(model.is_empty());
        assert_eq!(
            model.skipped().next().map(|(_, r)| r.clone()),
            Some(SkipReason::UnsupportedGeometryType("torus".into()))
        );
    }

    #[test]
    fn test_missing_formulas_use_defaults() {
        let parts = vec![GeometryPart::new("Bare", "box")];
        let model = build_model(&parts, &registry(), &BuildContext::new(60.0, 90.0, 60.0));
        let p = &model.primitives[0];
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(
            p.shape,
            PrimitiveShape::Box { width: 0.1, height: 0.1, depth: 0.1 }
        );
    }

    #[test]
    fn test_cylinder_and_sphere_reinterpretation() {
        let parts = vec![
            GeometryPart::new("Handle", "cylinder").with_dimensions("0.01", "0.12", "4"),
            GeometryPart::new("Knob", "sphere").with_dimensions("0.02", "16", "12"),
        ];
        let model = build_model(&parts, &registry(), &BuildContext::new(60.0, 90.0, 60.0));
        assert_eq!(
            model.primitive("Handle").unwrap().shape,
            PrimitiveShape::Cylinder { radius: 0.01, height: 0.12, radial_segments: 8 }
        );
        assert_eq!(
            model.primitive("Knob").unwrap().shape,
            PrimitiveShape::Sphere { radius: 0.02, width_segments: 16, height_segments: 12 }
        );
    }

    #[test]
    fn test_parts_built_in_render_order() {
        let parts = vec![
            GeometryPart::new("Third", "box").with_render_order(3),
            GeometryPart::new("First", "box").with_render_order(1),
            GeometryPart::new("Second", "box").with_render_order(2),
        ];
        let model = build_model(&parts, &registry(), &BuildContext::new(60.0, 90.0, 60.0));
        let names: Vec<_> = model.primitives.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_missing_material_records_fallback() {
        let parts = vec![GeometryPart::new("Body", "box").with_material("walnut")];
        let model = build_model(&parts, &registry(), &BuildContext::new(60.0, 90.0, 60.0));
        assert_eq!(model.len(), 1);
        assert_eq!(
            model.diagnostics,
            vec![PartDiagnostic::MaterialFallback {
                part_name: "Body".into(),
                material_name: "walnut".into(),
            }]
        );
    }

    #[test]
    fn test_selection_highlight() {
        let parts = vec![GeometryPart::new("Body", "box").with_color_override("selectedColor")];
        let model = build_model(
            &parts,
            &registry(),
            &BuildContext::new(60.0, 90.0, 60.0).selected(true),
        );
        assert_eq!(model.primitives[0].appearance.color, SELECTED_COLOR);
    }

    #[test]
    fn test_bounding_box_and_vertex_count() {
        let parts = vec![
            GeometryPart::new("A", "box")
                .with_position(0.0_f32, 0.0_f32, 0.0_f32)
                .with_dimensions(1.0_f32, 1.0_f32, 1.0_f32),
            GeometryPart::new("B", "box")
                .with_position(2.0_f32, 0.0_f32, 0.0_f32)
                .with_dimensions(1.0_f32, 1.0_f32, 1.0_f32),
        ];
        let model = build_model(&parts, &registry(), &BuildContext::new(60.0, 90.0, 60.0));
        let aabb = model.bounding_box().unwrap();
        assert_relative_eq!(aabb.min.x, -0.5);
        assert_relative_eq!(aabb.max.x, 2.5);
        assert_eq!(model.vertex_count(), 48);

        let (vertices, indices) = model.generate_mesh();
        assert_eq!(vertices.len(), 48);
        assert_eq!(indices.len(), 72);
        assert_eq!(indices.iter().copied().max(), Some(47));
    }

    #[test]
    fn test_huge_segment_formula_is_capped() {
        let parts =
            vec![GeometryPart::new("Knob", "sphere").with_dimensions("0.02", "1e10", "1e10")];
        let model = build_model(&parts, &registry(), &BuildContext::new(60.0, 90.0, 60.0));
        assert_eq!(
            model.primitive("Knob").unwrap().shape,
            PrimitiveShape::Sphere {
                radius: 0.02,
                width_segments: MAX_SEGMENTS,
                height_segments: MAX_SEGMENTS,
            }
        );

        let expected = (MAX_SEGMENTS as usize + 1) * (MAX_SEGMENTS as usize + 1);
        assert_eq!(model.vertex_count(), expected);
        let (vertices, indices) = model.generate_mesh();
        assert_eq!(vertices.len(), expected);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_mesh_stops_at_index_range() {
        let mut model = build_model(
            &[GeometryPart::new("Body", "box")],
            &registry(),
            &BuildContext::new(60.0, 90.0, 60.0),
        );
        let mut oversized = model.primitives[0].clone();
        oversized.name = "Oversized".into();
        oversized.shape = PrimitiveShape::Sphere {
            radius: 1.0,
            width_segments: u32::MAX,
            height_segments: 1,
        };
        model.primitives.push(oversized);

        let (vertices, indices) = model.generate_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
    }

    #[test]
    fn test_empty_model_has_no_bounding_box() {
        let model = build_model(&[], &registry(), &BuildContext::new(60.0, 90.0, 60.0));
        assert!(model.bounding_box().is_none());
        assert_eq!(model.vertex_count(), 0);
    }
}
