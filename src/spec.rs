//! Size-class presets
//!
//! Real-world dimensions (meters, kilograms) for the two RoboCup humanoid
//! leagues. Everything here is resolved once into plain values; the field
//! model scales them into simulation units.

use serde::{Deserialize, Serialize};

/// Humanoid league size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Adult,
    #[default]
    Kid,
}

impl SizeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Adult => "adult",
            SizeClass::Kid => "kid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "adult" | "adult_size" | "adultsize" => Some(SizeClass::Adult),
            "kid" | "kid_size" | "kidsize" => Some(SizeClass::Kid),
            _ => None,
        }
    }

    pub fn field(&self) -> FieldSpecification {
        match self {
            SizeClass::Adult => FieldSpecification {
                field_width: 16.0,
                field_height: 11.0,
                border_strip_width: BORDER_STRIP_WIDTH,
                line_density: 0.05,
                center_circle_diameter: 3.0,
                center_circle_diameter_density_factor: 2.08,
                penalty_area_width: 3.0,
                penalty_area_height: 6.0,
                goal_area_width: 1.0,
                goal_area_height: 4.0,
                goal_width: 0.6,
                goal_height: 2.6,
                goal_density: 0.12,
            },
            SizeClass::Kid => FieldSpecification {
                field_width: 11.0,
                field_height: 8.0,
                border_strip_width: BORDER_STRIP_WIDTH,
                line_density: 0.05,
                center_circle_diameter: 1.5,
                center_circle_diameter_density_factor: 2.15,
                penalty_area_width: 2.0,
                penalty_area_height: 5.0,
                goal_area_width: 1.0,
                goal_area_height: 3.0,
                goal_width: 0.6,
                goal_height: 2.6,
                goal_density: 0.12,
            },
        }
    }

    pub fn ball(&self) -> BallSpecification {
        match self {
            SizeClass::Adult => BallSpecification {
                diameter: 0.22,
                weight: 0.435,
            },
            SizeClass::Kid => BallSpecification {
                diameter: 0.13,
                weight: 0.205,
            },
        }
    }

    pub fn robot(&self) -> RobotSpecification {
        match self {
            SizeClass::Adult => RobotSpecification {
                max_speed: 0.0,
                max_rotation_speed: 0.0,
                weight: 0.0,
                diameter: 0.6,
            },
            SizeClass::Kid => RobotSpecification {
                max_speed: 0.0,
                max_rotation_speed: 0.0,
                weight: 0.0,
                diameter: 0.4,
            },
        }
    }
}

/// Width of the strip between the outer field edge and the lines (meters)
pub const BORDER_STRIP_WIDTH: f64 = 1.0;

/// Field dimensions in meters. "Width" runs goal to goal, "height" sideline to sideline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSpecification {
    pub field_width: f64,
    pub field_height: f64,
    pub border_strip_width: f64,
    pub line_density: f64,
    pub center_circle_diameter: f64,
    pub center_circle_diameter_density_factor: f64,
    pub penalty_area_width: f64,
    pub penalty_area_height: f64,
    pub goal_area_width: f64,
    pub goal_area_height: f64,
    pub goal_width: f64,
    pub goal_height: f64,
    /// Thickness of the goal posts and bars
    pub goal_density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSpecification {
    pub diameter: f64,
    pub weight: f64,
}

/// Robot dimensions. Speed and weight are carried for completeness; the
/// simulation uses the fixed speeds in `consts`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotSpecification {
    pub max_speed: f64,
    pub max_rotation_speed: f64,
    pub weight: f64,
    pub diameter: f64,
}
