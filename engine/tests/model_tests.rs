//! Model Tests - Building Parametric Models from Catalog Records
//!
//! Catalog parts and materials are loaded from JSON exactly as the catalog
//! store supplies them, then built for concrete element sizes.

use approx::assert_relative_eq;
use rightfit_layout::model::{
    BuildContext, GeometryPart, MaterialDefinition, MaterialRegistry, ModelBuilder,
    PartDiagnostic, PrimitiveShape, Shading, SkipReason, build_model,
};

const CORNER_CABINET_PARTS: &str = r##"[
    {
        "part_name": "Plinth X-leg",
        "part_type": "box",
        "render_order": 1,
        "position_x": "0",
        "position_y": "-height / 2 + plinthHeight / 2",
        "position_z": "cornerDepth / 2 - legLength / 2 - 0.1",
        "dimension_width": "legLength",
        "dimension_height": "plinthHeight",
        "dimension_depth": "cornerDepth - 0.1",
        "material_name": "plinth",
        "color_override": "plinthColor",
        "render_condition": null
    },
    {
        "part_name": "Cabinet X-leg",
        "part_type": "box",
        "render_order": 2,
        "position_x": "0",
        "position_y": "plinthHeight / 2",
        "position_z": "cornerDepth / 2 - legLength / 2",
        "dimension_width": "legLength",
        "dimension_height": "cabinetHeight",
        "dimension_depth": "cornerDepth",
        "material_name": "cabinet",
        "color_override": "cabinetMaterial",
        "render_condition": null
    },
    {
        "part_name": "Plinth Z-leg",
        "part_type": "box",
        "render_order": 3,
        "position_x": "cornerDepth / 2 - legLength / 2 - 0.1",
        "position_y": "-height / 2 + plinthHeight / 2",
        "position_z": "0",
        "dimension_width": "cornerDepth - 0.1",
        "dimension_height": "plinthHeight",
        "dimension_depth": "legLength",
        "material_name": "plinth",
        "color_override": "plinthColor",
        "render_condition": null
    },
    {
        "part_name": "Cabinet Z-leg",
        "part_type": "box",
        "render_order": 4,
        "position_x": "cornerDepth / 2 - legLength / 2",
        "position_y": "plinthHeight / 2",
        "position_z": "0",
        "dimension_width": "cornerDepth",
        "dimension_height": "cabinetHeight",
        "dimension_depth": "legLength",
        "material_name": "cabinet",
        "color_override": "cabinetMaterial",
        "render_condition": null
    }
]"##;

const MATERIALS: &str = r##"[
    {
        "material_name": "plinth",
        "material_type": "standard",
        "default_color": "#5a4a3a",
        "roughness": 0.8,
        "metalness": 0.0,
        "opacity": 1.0
    },
    {
        "material_name": "cabinet",
        "material_type": "standard",
        "default_color": "#8B7355",
        "roughness": 0.7,
        "metalness": 0.1,
        "opacity": 1.0
    }
]"##;

fn materials() -> MaterialRegistry {
    serde_json::from_str::<Vec<MaterialDefinition>>(MATERIALS)
        .unwrap()
        .into_iter()
        .collect()
}

fn corner_parts() -> Vec<GeometryPart> {
    serde_json::from_str(CORNER_CABINET_PARTS).unwrap()
}

fn corner_context() -> BuildContext {
    BuildContext::new(60.0, 90.0, 60.0)
        .corner(0.6, 0.6)
        .with_variable("plinthHeight", 0.15)
}

fn box_dims(shape: &PrimitiveShape) -> (f32, f32, f32) {
    match *shape {
        PrimitiveShape::Box { width, height, depth } => (width, height, depth),
        other => panic!("expected a box, got {other:?}"),
    }
}

// ============================================================================
// Corner cabinet
// ============================================================================

#[test]
fn test_corner_cabinet_builds_four_parts() {
    let parts = corner_parts();
    let materials = materials();
    let model = ModelBuilder::new(&parts, &materials).build(&corner_context());

    assert_eq!(model.len(), 4);
    assert!(model.diagnostics.is_empty());
}

#[test]
fn test_corner_cabinet_dimensions() {
    let model = build_model(&corner_parts(), &materials(), &corner_context());

    let expected = [
        ("Plinth X-leg", (0.6, 0.15, 0.5)),
        ("Cabinet X-leg", (0.6, 0.75, 0.6)),
        ("Plinth Z-leg", (0.5, 0.15, 0.6)),
        ("Cabinet Z-leg", (0.6, 0.75, 0.6)),
    ];
    for (name, (w, h, d)) in expected {
        let primitive = model.primitive(name).unwrap();
        let (width, height, depth) = box_dims(&primitive.shape);
        assert_relative_eq!(width, w, epsilon = 1e-5);
        assert_relative_eq!(height, h, epsilon = 1e-5);
        assert_relative_eq!(depth, d, epsilon = 1e-5);
    }
}

#[test]
fn test_corner_cabinet_legs_form_an_l() {
    let model = build_model(&corner_parts(), &materials(), &corner_context());

    let plinth_x = model.primitive("Plinth X-leg").unwrap().position;
    let cabinet_x = model.primitive("Cabinet X-leg").unwrap().position;
    let plinth_z = model.primitive("Plinth Z-leg").unwrap().position;
    let cabinet_z = model.primitive("Cabinet Z-leg").unwrap().position;

    // X-leg is offset along z, Z-leg along x.
    assert_relative_eq!(plinth_x.z, -0.1, epsilon = 1e-5);
    assert_relative_eq!(cabinet_x.z, 0.0, epsilon = 1e-5);
    assert_relative_eq!(plinth_z.x, -0.1, epsilon = 1e-5);
    assert_relative_eq!(cabinet_z.x, 0.0, epsilon = 1e-5);

    assert_relative_eq!(plinth_x.y, -0.375, epsilon = 1e-5);
    assert_relative_eq!(cabinet_x.y, 0.075, epsilon = 1e-5);
}

#[test]
fn test_corner_cabinet_colors() {
    let model = build_model(&corner_parts(), &materials(), &corner_context());

    let plinth = &model.primitive("Plinth X-leg").unwrap().appearance;
    let cabinet = &model.primitive("Cabinet X-leg").unwrap().appearance;
    assert_eq!(plinth.color.to_lowercase(), "#5a4a3a");
    assert_eq!(cabinet.color.to_lowercase(), "#8b7355");
    assert_eq!(plinth.shading, Shading::Standard { roughness: 0.8, metalness: 0.0 });
}

#[test]
fn test_corner_cabinet_bounding_box() {
    let model = build_model(&corner_parts(), &materials(), &corner_context());
    let aabb = model.bounding_box().unwrap();

    // Plinth bottom at -0.45, cabinet top at 0.075 + 0.375.
    assert_relative_eq!(aabb.min.y, -0.45, epsilon = 1e-5);
    assert_relative_eq!(aabb.max.y, 0.45, epsilon = 1e-5);
    assert_eq!(model.vertex_count(), 4 * 24);
}

// ============================================================================
// Render conditions
// ============================================================================

fn plinth_only() -> Vec<GeometryPart> {
    vec![
        GeometryPart::new("Plinth", "box")
            .with_position("0", "0", "0")
            .with_dimensions("width", "0.15", "depth")
            .with_material("plinth")
            .with_render_condition("!isWallCabinet"),
    ]
}

#[test]
fn test_plinth_hidden_for_wall_cabinets() {
    let parts = plinth_only();
    let materials = materials();

    let base = build_model(&parts, &materials, &BuildContext::new(60.0, 90.0, 60.0));
    assert_eq!(base.len(), 1);

    let wall = build_model(
        &parts,
        &materials,
        &BuildContext::new(60.0, 90.0, 60.0).wall_cabinet(true),
    );
    assert!(wall.is_empty());
    assert_eq!(
        wall.diagnostics,
        vec![PartDiagnostic::Skipped {
            part_name: "Plinth".into(),
            reason: SkipReason::ConditionFalse("!isWallCabinet".into()),
        }]
    );
}

#[test]
fn test_condition_override_through_custom_variable() {
    let wall = build_model(
        &plinth_only(),
        &materials(),
        &BuildContext::new(60.0, 90.0, 60.0).with_variable("isWallCabinet", 1.0),
    );
    assert!(wall.is_empty());
}

// ============================================================================
// Failure isolation
// ============================================================================

#[test]
fn test_one_bad_part_does_not_abort_the_model() {
    let mut parts = corner_parts();
    parts.push(
        GeometryPart::new("Broken shelf", "box")
            .with_dimensions("shelfWidth * 2", "0.02", "depth")
            .with_render_order(5),
    );
    parts.push(GeometryPart::new("Torus knob", "torus").with_render_order(6));

    let model = build_model(&parts, &materials(), &corner_context());
    assert_eq!(model.len(), 4);

    let skipped: Vec<_> = model.skipped().map(|(name, _)| name).collect();
    assert_eq!(skipped, ["Broken shelf", "Torus knob"]);

    let (_, reason) = model.skipped().next().unwrap();
    assert_eq!(reason.to_string(), "Invalid formula: shelfWidth * 2");
}

#[test]
fn test_selected_highlight_only_when_selected() {
    let parts = vec![GeometryPart::new("Body", "box").with_color_override("selectedColor")];
    let materials = materials();

    let idle = build_model(&parts, &materials, &BuildContext::new(60.0, 90.0, 60.0));
    let selected = build_model(
        &parts,
        &materials,
        &BuildContext::new(60.0, 90.0, 60.0).selected(true),
    );
    assert_ne!(idle.primitives[0].appearance.color, selected.primitives[0].appearance.color);
}

#[test]
fn test_combined_mesh_is_uploadable() {
    let model = build_model(&corner_parts(), &materials(), &corner_context());
    let (vertices, indices) = model.generate_mesh();
    assert_eq!(vertices.len(), model.vertex_count());
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));

    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    assert_eq!(bytes.len(), vertices.len() * 40);
}
