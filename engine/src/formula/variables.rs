//! Variable Environment
//!
//! Named numeric values that formulas are evaluated against, plus the
//! standard cabinet variable set derived from an element's real dimensions.
//!
//! ## Units
//! Element dimensions arrive in centimeters; every standard variable is in
//! meters so model formulas work directly in scene units.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default plinth (kick board) height in meters.
pub const DEFAULT_PLINTH_HEIGHT: f32 = 0.10;
/// Gap between the cabinet top and the door top in meters.
pub const DOOR_HEIGHT_CLEARANCE: f32 = 0.12;
/// Depth used when the element reports none, in meters.
pub const DEFAULT_DEPTH: f32 = 0.6;
/// Corner depth of a floor-standing corner unit in meters.
pub const BASE_CORNER_DEPTH: f32 = 0.6;
/// Corner depth of a wall-hung corner unit in meters.
pub const WALL_CORNER_DEPTH: f32 = 0.4;

/// A mapping from identifier to value.
///
/// Environments are values: [`Variables::with`] returns a new environment
/// rather than mutating a shared one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    values: HashMap<String, f32>,
}

impl Variables {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    /// True if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Return a copy of this environment with `name` bound to `value`.
    pub fn with(mut self, name: impl Into<String>, value: f32) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Bind `name` in place. Used while assembling a fresh environment.
    pub(crate) fn set(&mut self, name: impl Into<String>, value: f32) {
        self.values.insert(name.into(), value);
    }

    /// Overlay `other` on top of this environment; `other` wins on conflicts.
    pub fn merged(mut self, other: &Variables) -> Self {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), *value);
        }
        self
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f32)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, f32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ============================================================================
// STANDARD VARIABLES
// ============================================================================

/// Real element dimensions in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementDimensions {
    pub width: f32,
    pub height: f32,
    /// Zero means "not reported"; the standard set then uses [`DEFAULT_DEPTH`].
    pub depth: f32,
}

/// Optional overrides for the standard variable set. Lengths are in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StandardOptions {
    pub leg_length: Option<f32>,
    pub corner_depth: Option<f32>,
    pub plinth_height: Option<f32>,
    pub cabinet_height: Option<f32>,
    pub door_height: Option<f32>,
    pub is_wall_cabinet: bool,
}

/// Build the standard variable set for a cabinet-like element.
///
/// | variable        | default                                   |
/// |-----------------|-------------------------------------------|
/// | `width`         | element width / 100                       |
/// | `height`        | element height / 100                      |
/// | `depth`         | element depth / 100 (0.6 if zero)         |
/// | `plinthHeight`  | 0.10                                      |
/// | `cabinetHeight` | `height - plinthHeight`                   |
/// | `doorHeight`    | `height - 0.12`                           |
/// | `legLength`     | `width`                                   |
/// | `cornerDepth`   | 0.6, or 0.4 for wall cabinets             |
/// | `isWallCabinet` | 0 / 1                                     |
pub fn standard_variables(element: ElementDimensions, options: StandardOptions) -> Variables {
    let width = element.width / 100.0;
    let height = element.height / 100.0;
    let depth = if element.depth != 0.0 {
        element.depth / 100.0
    } else {
        DEFAULT_DEPTH
    };

    let plinth_height = options.plinth_height.unwrap_or(DEFAULT_PLINTH_HEIGHT);
    let default_corner_depth = if options.is_wall_cabinet {
        WALL_CORNER_DEPTH
    } else {
        BASE_CORNER_DEPTH
    };

    let mut vars = Variables::new();
    vars.set("width", width);
    vars.set("height", height);
    vars.set("depth", depth);
    vars.set("plinthHeight", plinth_height);
    vars.set(
        "cabinetHeight",
        options.cabinet_height.unwrap_or(height - plinth_height),
    );
    vars.set(
        "doorHeight",
        options.door_height.unwrap_or(height - DOOR_HEIGHT_CLEARANCE),
    );
    vars.set("legLength", options.leg_length.unwrap_or(width));
    vars.set("cornerDepth", options.corner_depth.unwrap_or(default_corner_depth));
    vars.set("isWallCabinet", flag(options.is_wall_cabinet));
    vars
}

/// Encode a boolean flag as 0/1 for use in formulas.
pub fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

// ============================================================================
// RENDER CONDITIONS
// ============================================================================

/// Evaluate a render condition such as `isWallCabinet` or `!isWallCabinet`.
///
/// A leading `!` is true when the named variable is exactly zero; a bare name
/// is true when the variable is anything but zero. An unbound variable is not
/// zero, so a bare name passes and its negation fails.
pub fn evaluate_condition(condition: &str, variables: &Variables) -> bool {
    let condition = condition.trim();
    match condition.strip_prefix('!') {
        Some(name) => variables.get(name.trim()) == Some(0.0),
        None => variables.get(condition) != Some(0.0),
    }
}
