//! Materials and Appearance
//!
//! Material definitions come from an external registry and are looked up by
//! name. A part's final appearance cascades: part override → material default
//! → hard-coded fallback.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::part::{ColorOverride, ColorRole, GeometryPart};

// ============================================================================
// PALETTE
// ============================================================================

/// Default cabinet body color, also the last-resort fallback.
pub const DEFAULT_COLOR: &str = "#8B7355";
/// Highlight used by the `selectedColor` role while the element is selected.
pub const SELECTED_COLOR: &str = "#FFD700";
pub const DOOR_COLOR: &str = "#654321";
pub const HANDLE_COLOR: &str = "#C0C0C0";
pub const PLINTH_COLOR: &str = "#5a4a3a";
pub const WORKTOP_COLOR: &str = "#E8E8E8";

pub const DEFAULT_ROUGHNESS: f32 = 0.7;
pub const DEFAULT_METALNESS: f32 = 0.1;
pub const DEFAULT_OPACITY: f32 = 1.0;

impl ColorRole {
    /// Fixed palette value for this role.
    pub fn palette_color(self, is_selected: bool) -> &'static str {
        match self {
            ColorRole::Selected if is_selected => SELECTED_COLOR,
            ColorRole::Selected | ColorRole::CabinetMaterial => DEFAULT_COLOR,
            ColorRole::Door => DOOR_COLOR,
            ColorRole::Handle => HANDLE_COLOR,
            ColorRole::Plinth => PLINTH_COLOR,
            ColorRole::Worktop => WORKTOP_COLOR,
        }
    }
}

// ============================================================================
// MATERIAL DEFINITIONS
// ============================================================================

/// Shading model of a material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaterialType {
    /// Physically based: roughness + metalness.
    #[default]
    Standard,
    /// Diffuse only.
    Lambert,
    /// Specular highlight driven by shininess.
    Phong,
}

impl From<String> for MaterialType {
    /// Unknown type names shade as `Standard`.
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "lambert" => MaterialType::Lambert,
            "phong" => MaterialType::Phong,
            _ => MaterialType::Standard,
        }
    }
}

impl From<MaterialType> for String {
    fn from(t: MaterialType) -> Self {
        match t {
            MaterialType::Standard => "standard",
            MaterialType::Lambert => "lambert",
            MaterialType::Phong => "phong",
        }
        .to_string()
    }
}

/// A named material from the material registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDefinition {
    pub material_name: String,
    #[serde(default)]
    pub material_type: MaterialType,
    #[serde(default)]
    pub default_color: Option<String>,
    #[serde(default)]
    pub roughness: Option<f32>,
    #[serde(default)]
    pub metalness: Option<f32>,
    #[serde(default)]
    pub opacity: Option<f32>,
}

impl MaterialDefinition {
    /// A standard material with only a name and color.
    pub fn new(material_name: impl Into<String>, default_color: impl Into<String>) -> Self {
        Self {
            material_name: material_name.into(),
            material_type: MaterialType::Standard,
            default_color: Some(default_color.into()),
            roughness: None,
            metalness: None,
            opacity: None,
        }
    }
}

/// Materials keyed by `material_name`.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: HashMap<String, MaterialDefinition>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material, replacing any previous one with the same name.
    pub fn insert(&mut self, material: MaterialDefinition) {
        self.materials.insert(material.material_name.clone(), material);
    }

    pub fn get(&self, name: &str) -> Option<&MaterialDefinition> {
        self.materials.get(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl FromIterator<MaterialDefinition> for MaterialRegistry {
    fn from_iter<I: IntoIterator<Item = MaterialDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for material in iter {
            registry.insert(material);
        }
        registry
    }
}

// ============================================================================
// APPEARANCE
// ============================================================================

/// Shading-model specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shading {
    Standard { roughness: f32, metalness: f32 },
    Lambert,
    Phong { shininess: f32 },
}

/// Resolved look of one primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appearance {
    /// Hex color string, e.g. `#8B7355`.
    pub color: String,
    pub opacity: f32,
    pub transparent: bool,
    pub shading: Shading,
}

impl Appearance {
    /// Color as 0-1 RGBA with opacity in alpha. Malformed hex falls back to
    /// [`DEFAULT_COLOR`].
    pub fn rgba(&self) -> [f32; 4] {
        let [r, g, b] = parse_hex_color(&self.color)
            .or_else(|| parse_hex_color(DEFAULT_COLOR))
            .unwrap_or([0.5, 0.5, 0.5]);
        [r, g, b, self.opacity]
    }
}

/// Parse `#RRGGBB` or `#RGB` into 0-1 RGB.
pub fn parse_hex_color(value: &str) -> Option<[f32; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match hex.len() {
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1].repeat(2));
            Some([short(0)?, short(1)?, short(2)?])
        }
        _ => None,
    }
}

/// Resolve a part's appearance against its (optional) material definition.
pub fn resolve_appearance(
    part: &GeometryPart,
    material: Option<&MaterialDefinition>,
    is_selected: bool,
) -> Appearance {
    let color = match part.color() {
        Some(ColorOverride::Literal(hex)) => hex,
        Some(ColorOverride::Role(role)) => role.palette_color(is_selected).to_string(),
        None => material
            .and_then(|m| m.default_color.clone())
            .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
    };

    let roughness = part
        .roughness
        .or(material.and_then(|m| m.roughness))
        .unwrap_or(DEFAULT_ROUGHNESS);
    let metalness = part
        .metalness
        .or(material.and_then(|m| m.metalness))
        .unwrap_or(DEFAULT_METALNESS);
    let opacity = part
        .opacity
        .or(material.and_then(|m| m.opacity))
        .unwrap_or(DEFAULT_OPACITY);

    let shading = match material.map(|m| m.material_type).unwrap_or_default() {
        MaterialType::Standard => Shading::Standard { roughness, metalness },
        MaterialType::Lambert => Shading::Lambert,
        MaterialType::Phong => Shading::Phong {
            shininess: (1.0 - roughness) * 100.0,
        },
    };

    Appearance {
        color,
        opacity,
        transparent: opacity < 1.0,
        shading,
    }
}
