//! A single robot
//!
//! Agents move along their heading (or perpendicular to it when strafing)
//! at fixed speeds. The two eyes and the shot hitbox are anchor points that
//! travel and turn rigidly with the body.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::ball::Ball;
use super::collision::circle_circle_collision;
use super::field::FieldModel;
use super::observation::{RelativeState, Vision};
use crate::consts::*;
use crate::{Point, normalize_degrees, polar_offset, rotate_point};

/// Anchor points derived from the body pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub eye_left: Point,
    pub eye_right: Point,
    /// Centre of the shot hitbox, on the body outline along the heading
    pub hitbox: Point,
}

impl Anchors {
    fn from_pose(pos: Point, angle: f64, radius: f64) -> Self {
        let eye_radius = radius * 3.0 / 4.0;
        Self {
            eye_left: polar_offset(pos, angle + EYE_ANGLE_OFFSET, eye_radius, eye_radius),
            eye_right: polar_offset(pos, angle - EYE_ANGLE_OFFSET, eye_radius, eye_radius),
            hitbox: polar_offset(pos, angle, radius, radius),
        }
    }

    /// Same anchors reflected across the halfway line
    fn mirrored_x(&self) -> Self {
        let flip = |p: Point| DVec2::new(-p.x, p.y);
        Self {
            eye_left: flip(self.eye_left),
            eye_right: flip(self.eye_right),
            hitbox: flip(self.hitbox),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// -1 for the left side, +1 for the right side
    pub direction: f64,
    pub pos: Point,
    pub init_pos: Point,
    pub radius: f64,
    pub color: String,
    pub vel: DVec2,
    /// Signed speed along the movement heading; both components carry the same value
    pub desired_vel: DVec2,
    /// Heading in degrees, always in [0, 360)
    pub angle: f64,
    pub init_angle: f64,
    /// Rotation applied to the anchors on the next update
    pub desired_angle: f64,
    pub anchors: Anchors,
    pub init_anchors: Anchors,
    pub hitbox_radius: f64,
    pub is_shooting: bool,
    pub is_left: bool,
    pub is_right: bool,
    pub state: RelativeState,
}

impl Agent {
    pub fn new(
        direction: f64,
        pos: Point,
        radius: f64,
        color: impl Into<String>,
        angle: f64,
        vision: Vision,
    ) -> Self {
        let angle = normalize_degrees(angle);
        let anchors = Anchors::from_pose(pos, angle, radius);
        Self {
            direction,
            pos,
            init_pos: pos,
            radius,
            color: color.into(),
            vel: DVec2::ZERO,
            desired_vel: DVec2::ZERO,
            angle,
            init_angle: angle,
            desired_angle: 0.0,
            anchors,
            init_anchors: anchors,
            hitbox_radius: radius / HITBOX_RADIUS_DIVISOR,
            is_shooting: false,
            is_left: false,
            is_right: false,
            state: RelativeState::new(vision),
        }
    }

    /// Translate an action into desired velocity, shot intent and rotation
    ///
    /// A translation intent is taken only when it is the only one set, so any
    /// pair of movement intents cancels out. The heading turns immediately;
    /// the anchors follow in `update`.
    pub fn set_action(&mut self, action: &Action) {
        let Action {
            left,
            right,
            forward,
            backward,
            shoot,
            rotate_left,
            rotate_right,
        } = *action;

        self.desired_vel = DVec2::ZERO;
        self.is_left = false;
        self.is_right = false;

        if left && !right && !forward && !backward {
            self.desired_vel = DVec2::splat(PLAYER_SPEED_LEFT);
            self.is_left = true;
        }
        if right && !left && !forward && !backward {
            self.desired_vel = DVec2::splat(-PLAYER_SPEED_RIGHT);
            self.is_right = true;
        }
        if forward && !backward && !left && !right {
            self.desired_vel = DVec2::splat(PLAYER_SPEED_FORWARD);
        }
        if backward && !forward && !left && !right {
            self.desired_vel = DVec2::splat(-PLAYER_SPEED_BACKWARD);
        }

        self.is_shooting = shoot;

        self.desired_angle = 0.0;
        if rotate_left && !rotate_right {
            self.desired_angle = ROTATION_STEP;
        } else if rotate_right && !rotate_left {
            self.desired_angle = -ROTATION_STEP;
        }
        self.angle = normalize_degrees(self.angle + self.desired_angle);
    }

    /// Heading used for translation: strafes run perpendicular to the body
    #[inline]
    fn movement_heading(&self) -> f64 {
        if self.is_left || self.is_right {
            self.angle + 90.0
        } else {
            self.angle
        }
    }

    /// Where the body would be after this tick if nothing vetoes the move
    pub fn next_position(&self) -> Point {
        let step = self.desired_vel * self.direction * TIMESTEP;
        polar_offset(self.pos, self.movement_heading(), step.x, step.y)
    }

    /// True if a body centred at `point` would touch or cross the field edge
    pub fn is_outside_field(&self, point: Point, field: &FieldModel) -> bool {
        let half_width = field.field_width() / 2.0;
        point.x - self.radius <= -half_width
            || point.x + self.radius >= half_width
            || point.y + self.radius >= field.field_height()
            || point.y - self.radius <= 0.0
    }

    /// Drop this tick's translation intent
    #[inline]
    pub fn cancel_movement(&mut self) {
        self.desired_vel = DVec2::ZERO;
    }

    pub fn update(&mut self, field: &FieldModel) {
        if self.is_outside_field(self.next_position(), field) {
            self.cancel_movement();
        }
        self.vel = self.desired_vel * self.direction;
        self.advance();
        self.rotate_anchors();
    }

    fn advance(&mut self) {
        let heading = self.movement_heading();
        let step = self.vel * TIMESTEP;
        let shift = |p: Point| polar_offset(p, heading, step.x, step.y);

        self.pos = shift(self.pos);
        self.anchors.eye_left = shift(self.anchors.eye_left);
        self.anchors.eye_right = shift(self.anchors.eye_right);
        self.anchors.hitbox = shift(self.anchors.hitbox);
    }

    fn rotate_anchors(&mut self) {
        let (pos, delta) = (self.pos, self.desired_angle);
        self.anchors.eye_left = rotate_point(self.anchors.eye_left, pos, delta);
        self.anchors.eye_right = rotate_point(self.anchors.eye_right, pos, delta);
        self.anchors.hitbox = rotate_point(self.anchors.hitbox, pos, delta);
    }

    /// Back to the kick-off pose
    pub fn reset_position(&mut self) {
        self.pos = self.init_pos;
        self.angle = self.init_angle;
        self.anchors = self.init_anchors;
    }

    /// Kick-off pose on the other half, facing the other way
    pub fn reset_position_after_halftime(&mut self) {
        self.reset_position();
        self.direction = -self.direction;
        self.pos = DVec2::new(-self.init_pos.x, self.init_pos.y);
        self.anchors = self.init_anchors.mirrored_x();
    }

    /// Shoot if the shot hitbox touches the ball. Returns true on a shot.
    pub fn manage_shot_rotated(&self, ball: &mut Ball) -> bool {
        if self.is_shooting
            && circle_circle_collision(
                self.anchors.hitbox,
                self.hitbox_radius,
                ball.pos,
                ball.radius,
            )
        {
            ball.apply_shot(self, SHOT_POWER);
            return true;
        }
        false
    }

    /// Push the ball out of the body. Returns true on contact.
    pub fn manage_collision_with_ball(&self, ball: &mut Ball) -> bool {
        if ball.is_colliding(self) {
            ball.resolve_player_collision(self);
            return true;
        }
        false
    }

    /// Scaled observation from the last state refresh
    pub fn observation(&self) -> Vec<f64> {
        self.state.observation()
    }
}
