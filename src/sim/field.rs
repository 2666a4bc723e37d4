//! Static field geometry
//!
//! Every zone is a linear scaling of the size-class specification into
//! simulation units. The origin sits at the bottom centre of the field:
//! x spans [-field_width/2, field_width/2], y spans [0, field_height].
//! Zones are anchored at their top-left corner.

use serde::{Deserialize, Serialize};

use crate::consts::CARTESIAN_FACTOR;
use crate::spec::FieldSpecification;

/// Play-area outline (the touch lines and goal lines)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideLine {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub x_background: f64,
    pub y_background: f64,
    pub width_background: f64,
    pub height_background: f64,
}

/// Halfway line and centre circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiddleLine {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub circle_x: f64,
    pub circle_y: f64,
    pub circle_r: f64,
    pub circle_background_r: f64,
}

/// A box drawn against both goal lines (penalty area, goal area)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalLineBox {
    pub left_x: f64,
    pub right_x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub left_x_background: f64,
    pub right_x_background: f64,
    pub y_background: f64,
    pub width_background: f64,
    pub height_background: f64,
}

/// The two goal frames, sitting outside the goal lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    /// Back of the left goal
    pub left_x: f64,
    /// Mouth of the right goal (on the right goal line)
    pub right_x: f64,
    /// Top edge shared by both goals
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Post and bar thickness
    pub density: f64,
    pub left_x_background: f64,
    pub right_x_background: f64,
    pub y_background: f64,
    pub width_background: f64,
    pub height_background: f64,
}

/// Derived, immutable field geometry in simulation units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldModel {
    specification: FieldSpecification,
    field_width: f64,
    field_height: f64,
    scale_meter: f64,
    field_x: f64,
    field_y: f64,
    border_strip_width: f64,
    play_area_x: f64,
    play_area_y: f64,
    play_area_width: f64,
    play_area_height: f64,
    line_density: f64,
    pub side_line: SideLine,
    pub middle_line: MiddleLine,
    pub penalty_area: GoalLineBox,
    pub goal_area: GoalLineBox,
    pub goals: Goals,
}

impl FieldModel {
    pub fn new(specification: FieldSpecification) -> Self {
        let field_width = specification.field_width * CARTESIAN_FACTOR;
        let field_height = specification.field_height * CARTESIAN_FACTOR;
        let scale_meter = field_width / specification.field_width;

        // Top-left corner of the whole field
        let field_x = -field_width / 2.0;
        let field_y = field_height;

        let border_strip_width = specification.border_strip_width * scale_meter;
        let play_area_width = field_width - 2.0 * border_strip_width;
        let play_area_height = field_height - 2.0 * border_strip_width;
        let play_area_x = field_x + border_strip_width;
        let play_area_y = field_y - border_strip_width;
        let line_density = specification.line_density * scale_meter;

        let side_line = SideLine {
            x: play_area_x,
            y: play_area_y,
            width: play_area_width,
            height: play_area_height,
            x_background: play_area_x + line_density,
            y_background: play_area_y - line_density,
            width_background: play_area_width - line_density * 2.0,
            height_background: play_area_height - line_density * 2.0,
        };

        let center_circle_diameter = specification.center_circle_diameter * scale_meter;
        let middle_line = MiddleLine {
            x: -line_density / 2.0,
            y: play_area_y,
            width: line_density,
            height: play_area_height,
            circle_x: 0.0,
            circle_y: field_y / 2.0,
            circle_r: center_circle_diameter / 2.0,
            circle_background_r: center_circle_diameter
                / specification.center_circle_diameter_density_factor,
        };

        // Vertical gaps are measured in meters against the play area height
        let real_play_area_height =
            specification.field_height - 2.0 * specification.border_strip_width;
        let gap = |zone_height: f64| (real_play_area_height - zone_height) / 2.0 * scale_meter;

        let penalty_area = goal_line_box(
            specification.penalty_area_width * scale_meter,
            specification.penalty_area_height * scale_meter,
            play_area_y - gap(specification.penalty_area_height),
            play_area_x,
            play_area_width,
            line_density,
        );
        let goal_area = goal_line_box(
            specification.goal_area_width * scale_meter,
            specification.goal_area_height * scale_meter,
            play_area_y - gap(specification.goal_area_height),
            play_area_x,
            play_area_width,
            line_density,
        );

        let goal_width = specification.goal_width * scale_meter;
        let goal_height = specification.goal_height * scale_meter;
        let goal_density = specification.goal_density * scale_meter;
        let goal_y = play_area_y - gap(specification.goal_height);
        let goals = Goals {
            left_x: play_area_x - goal_width,
            right_x: play_area_x + play_area_width,
            y: goal_y,
            width: goal_width,
            height: goal_height,
            density: goal_density,
            left_x_background: play_area_x - goal_width + goal_density,
            right_x_background: play_area_x + play_area_width,
            y_background: goal_y - goal_density,
            width_background: goal_width - goal_density,
            height_background: goal_height - goal_density * 2.0,
        };

        Self {
            specification,
            field_width,
            field_height,
            scale_meter,
            field_x,
            field_y,
            border_strip_width,
            play_area_x,
            play_area_y,
            play_area_width,
            play_area_height,
            line_density,
            side_line,
            middle_line,
            penalty_area,
            goal_area,
            goals,
        }
    }

    pub fn specification(&self) -> &FieldSpecification {
        &self.specification
    }

    /// Simulation units per meter
    #[inline]
    pub fn scale_meter(&self) -> f64 {
        self.scale_meter
    }

    #[inline]
    pub fn field_width(&self) -> f64 {
        self.field_width
    }

    #[inline]
    pub fn field_height(&self) -> f64 {
        self.field_height
    }

    #[inline]
    pub fn field_x(&self) -> f64 {
        self.field_x
    }

    #[inline]
    pub fn field_y(&self) -> f64 {
        self.field_y
    }

    #[inline]
    pub fn border_strip_width(&self) -> f64 {
        self.border_strip_width
    }

    #[inline]
    pub fn play_area_x(&self) -> f64 {
        self.play_area_x
    }

    #[inline]
    pub fn play_area_y(&self) -> f64 {
        self.play_area_y
    }

    #[inline]
    pub fn play_area_width(&self) -> f64 {
        self.play_area_width
    }

    #[inline]
    pub fn play_area_height(&self) -> f64 {
        self.play_area_height
    }

    /// Painted line thickness
    #[inline]
    pub fn line_density(&self) -> f64 {
        self.line_density
    }

    /// Vertical centre of the play area
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.play_area_y - self.play_area_height / 2.0
    }
}

fn goal_line_box(
    width: f64,
    height: f64,
    y: f64,
    play_area_x: f64,
    play_area_width: f64,
    line_density: f64,
) -> GoalLineBox {
    let right_x = play_area_x + play_area_width - width;
    GoalLineBox {
        left_x: play_area_x,
        right_x,
        y,
        width,
        height,
        left_x_background: play_area_x + line_density,
        right_x_background: right_x + line_density,
        y_background: y - line_density,
        width_background: width - line_density * 2.0,
        height_background: height - line_density * 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SizeClass;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_kid_size_dimensions() {
        let field = FieldModel::new(SizeClass::Kid.field());
        assert!(approx(field.field_width(), 44.0));
        assert!(approx(field.field_height(), 32.0));
        assert!(approx(field.scale_meter(), 4.0));
        assert!(approx(field.play_area_x(), -18.0));
        assert!(approx(field.play_area_y(), 28.0));
        assert!(approx(field.play_area_width(), 36.0));
        assert!(approx(field.play_area_height(), 24.0));
        assert!(approx(field.center_y(), 16.0));
    }

    #[test]
    fn test_kid_size_goals() {
        let field = FieldModel::new(SizeClass::Kid.field());
        let g = field.goals;
        assert!(approx(g.width, 2.4));
        assert!(approx(g.height, 10.4));
        assert!(approx(g.density, 0.48));
        assert!(approx(g.left_x, -20.4));
        assert!(approx(g.right_x, 18.0));
        assert!(approx(g.y, 21.2));
        // Goals are centred on the play area
        assert!(approx(g.y - g.height / 2.0, field.center_y()));
    }

    #[test]
    fn test_adult_size_boxes_are_symmetric() {
        let field = FieldModel::new(SizeClass::Adult.field());
        for zone in [field.penalty_area, field.goal_area] {
            let left_edge = zone.left_x;
            let right_edge = zone.right_x + zone.width;
            assert!(approx(left_edge, -right_edge));
            assert!(approx(zone.y - zone.height / 2.0, field.center_y()));
        }
    }

    #[test]
    fn test_middle_line_is_centred() {
        let field = FieldModel::new(SizeClass::Adult.field());
        let m = field.middle_line;
        assert!(approx(m.x + m.width / 2.0, 0.0));
        assert!(approx(m.circle_y, field.field_height() / 2.0));
        assert!(approx(m.circle_r, 6.0));
    }
}
