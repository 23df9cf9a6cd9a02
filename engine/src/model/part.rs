//! Geometry Parts
//!
//! Declarative primitive descriptors supplied by the catalog. Every position
//! and size is a [`Formula`] so the model follows the element's dimensions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::formula::Formula;

/// Primitive kinds a geometry part can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    /// width / height / depth
    Box,
    /// radius / height / radial segments
    Cylinder,
    /// radius / width segments / height segments
    Sphere,
}

impl FromStr for PartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" => Ok(PartType::Box),
            "cylinder" => Ok(PartType::Cylinder),
            "sphere" => Ok(PartType::Sphere),
            _ => Err(s.to_string()),
        }
    }
}

/// Semantic color roles a part may use instead of a literal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Accent when the element is selected, cabinet color otherwise.
    Selected,
    CabinetMaterial,
    Door,
    Handle,
    Plinth,
    Worktop,
}

impl ColorRole {
    /// Match a role name, ignoring case (`selectedColor`, `doorColor`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "selectedcolor" => Some(ColorRole::Selected),
            "cabinetmaterial" => Some(ColorRole::CabinetMaterial),
            "doorcolor" => Some(ColorRole::Door),
            "handlecolor" => Some(ColorRole::Handle),
            "plinthcolor" => Some(ColorRole::Plinth),
            "worktopcolor" => Some(ColorRole::Worktop),
            _ => None,
        }
    }
}

/// A parsed `color_override` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorOverride {
    /// A literal hex-like color such as `#C0C0C0`.
    Literal(String),
    /// A palette role.
    Role(ColorRole),
}

impl ColorOverride {
    /// Parse an override string. Returns `None` for blank or unrecognised
    /// values, which then defer to the material's color.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            Some(ColorOverride::Literal(value.to_string()))
        } else {
            ColorRole::from_name(value).map(ColorOverride::Role)
        }
    }
}

/// One declarative primitive of a parametric model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPart {
    pub part_name: String,
    /// `box`, `cylinder` or `sphere`; anything else is skipped at build time.
    pub part_type: String,
    #[serde(default)]
    pub render_order: i32,

    #[serde(default)]
    pub position_x: Option<Formula>,
    #[serde(default)]
    pub position_y: Option<Formula>,
    #[serde(default)]
    pub position_z: Option<Formula>,

    #[serde(default)]
    pub dimension_width: Option<Formula>,
    #[serde(default)]
    pub dimension_height: Option<Formula>,
    #[serde(default)]
    pub dimension_depth: Option<Formula>,

    #[serde(default)]
    pub material_name: Option<String>,
    #[serde(default)]
    pub color_override: Option<String>,
    #[serde(default)]
    pub roughness: Option<f32>,
    #[serde(default)]
    pub metalness: Option<f32>,
    #[serde(default)]
    pub opacity: Option<f32>,

    /// Variable name, optionally negated with a leading `!`.
    #[serde(default)]
    pub render_condition: Option<String>,
}

impl GeometryPart {
    /// A box part with no formulas set; fill in the rest with struct update
    /// syntax or the `with_*` helpers.
    pub fn new(part_name: impl Into<String>, part_type: impl Into<String>) -> Self {
        Self {
            part_name: part_name.into(),
            part_type: part_type.into(),
            render_order: 0,
            position_x: None,
            position_y: None,
            position_z: None,
            dimension_width: None,
            dimension_height: None,
            dimension_depth: None,
            material_name: None,
            color_override: None,
            roughness: None,
            metalness: None,
            opacity: None,
            render_condition: None,
        }
    }

    /// Set the three position formulas.
    pub fn with_position(
        mut self,
        x: impl Into<Formula>,
        y: impl Into<Formula>,
        z: impl Into<Formula>,
    ) -> Self {
        self.position_x = Some(x.into());
        self.position_y = Some(y.into());
        self.position_z = Some(z.into());
        self
    }

    /// Set the three dimension formulas.
    pub fn with_dimensions(
        mut self,
        width: impl Into<Formula>,
        height: impl Into<Formula>,
        depth: impl Into<Formula>,
    ) -> Self {
        self.dimension_width = Some(width.into());
        self.dimension_height = Some(height.into());
        self.dimension_depth = Some(depth.into());
        self
    }

    pub fn with_material(mut self, material_name: impl Into<String>) -> Self {
        self.material_name = Some(material_name.into());
        self
    }

    pub fn with_color_override(mut self, color: impl Into<String>) -> Self {
        self.color_override = Some(color.into());
        self
    }

    pub fn with_render_condition(mut self, condition: impl Into<String>) -> Self {
        self.render_condition = Some(condition.into());
        self
    }

    pub fn with_render_order(mut self, render_order: i32) -> Self {
        self.render_order = render_order;
        self
    }

    /// Parsed primitive kind, or the raw string if it is not supported.
    pub fn kind(&self) -> Result<PartType, String> {
        self.part_type.parse()
    }

    /// Parsed color override, if any.
    pub fn color(&self) -> Option<ColorOverride> {
        self.color_override.as_deref().and_then(ColorOverride::parse)
    }
}
