//! The match ball
//!
//! Continuous state only: position and velocity are integrated every tick,
//! bounced off the goal frames and field edges, and decayed by friction.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::collision::{Rect, RectContact, circle_rect_collision};
use super::field::FieldModel;
use crate::Point;
use crate::consts::*;

/// The ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Point,
    pub prev_pos: Point,
    pub vel: DVec2,
    pub radius: f64,
    pub color: String,
    pub init_pos: Point,
}

/// One face of a goal frame: the rectangle tested for contact and the
/// edges the ball is pinned against when it bounces
#[derive(Debug, Clone, Copy)]
struct FrameSegment {
    rect: Rect,
    x_left: f64,
    x_right: f64,
    y_up: f64,
    y_down: f64,
}

impl Ball {
    pub fn new(pos: Point, radius: f64, color: impl Into<String>) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel: DVec2::ZERO,
            radius,
            color: color.into(),
            init_pos: pos,
        }
    }

    /// Kick the ball away from the agent's centre
    ///
    /// The impulse is proportional to the centre-to-centre offset and is not
    /// capped.
    pub fn apply_shot(&mut self, agent: &Agent, power: f64) {
        self.vel = (self.pos - agent.pos) * power;
    }

    /// Squared distance between the ball centre and the agent centre
    #[inline]
    pub fn squared_distance(&self, agent: &Agent) -> f64 {
        self.pos.distance_squared(agent.pos)
    }

    #[inline]
    pub fn is_colliding(&self, agent: &Agent) -> bool {
        let r = self.radius + agent.radius;
        r * r > self.squared_distance(agent)
    }

    /// Push the ball out of an agent's body and bounce it off the contact normal
    pub fn resolve_player_collision(&mut self, agent: &Agent) {
        let offset = self.pos - agent.pos;
        let distance = offset.length();
        if distance == 0.0 {
            log::warn!(
                "ball and agent '{}' share a centre, skipping collision response",
                agent.color
            );
            return;
        }

        let normal = offset / distance;
        let nudge = normal * NUDGE;
        while self.is_colliding(agent) {
            self.pos += nudge;
        }

        // Reflect the relative velocity about the contact normal
        let mut relative = self.vel - agent.vel;
        let along_normal = relative.dot(normal);
        relative -= normal * (along_normal * 2.0);
        self.vel = (relative + agent.vel) * COLLISION_BLEND;
    }

    /// Bounce off the inside faces of both goal frames
    ///
    /// All six faces are tested against the pre-bounce position, then every
    /// contact is applied in order. A corner can therefore correct twice in
    /// one tick.
    pub fn resolve_goal_collision(&mut self, field: &FieldModel) {
        let segments = goal_frame_segments(field);
        let contacts: Vec<RectContact> = segments
            .iter()
            .map(|s| circle_rect_collision(s.rect, self.pos, self.radius))
            .collect();

        for (segment, contact) in segments.iter().zip(contacts) {
            self.bounce_off_frame(segment, contact);
        }
    }

    fn bounce_off_frame(&mut self, segment: &FrameSegment, contact: RectContact) {
        if contact.left {
            self.vel.x *= -FRICTION;
            self.pos.x = segment.x_left - self.radius;
        } else if contact.right {
            self.vel.x *= -FRICTION;
            self.pos.x = segment.x_right + self.radius;
        } else if contact.up {
            self.vel.y *= -FRICTION;
            self.pos.y = segment.y_up + self.radius;
        } else if contact.down {
            self.vel.y *= -FRICTION;
            self.pos.y = segment.y_down - self.radius;
        }
    }

    /// Advance one tick: integrate, bounce, clamp to the field, apply friction
    pub fn update(&mut self, field: &FieldModel) {
        self.prev_pos = self.pos;
        self.pos += self.vel * TIMESTEP;

        self.resolve_goal_collision(field);

        let half_width = field.field_width() / 2.0;
        let height = field.field_height();

        if self.pos.x - self.radius <= -half_width {
            self.vel.x *= -FRICTION;
            self.pos.x = -half_width + self.radius;
        }
        if self.pos.x + self.radius >= half_width {
            self.vel.x *= -FRICTION;
            self.pos.x = half_width - self.radius;
        }
        if self.pos.y + self.radius >= height {
            self.vel.y *= -FRICTION;
            self.pos.y = height - self.radius;
        }
        if self.pos.y - self.radius <= 0.0 {
            self.vel.y *= -FRICTION;
            self.pos.y = self.radius;
        }

        self.vel *= FRICTION;
    }

    /// Return to the kick-off spot at rest
    pub fn reset_position(&mut self) {
        self.pos = self.init_pos;
        self.vel = DVec2::ZERO;
    }
}

/// Top bar, back post and bottom bar of the left goal, then the right goal
fn goal_frame_segments(field: &FieldModel) -> [FrameSegment; 6] {
    let g = &field.goals;
    let line = field.line_density();
    let bar_width = g.width + line;
    let bottom_bar_y = g.y - g.height + g.density;
    let right_bar_x = g.right_x - line;
    let right_post_x = g.right_x + g.width - g.density;

    [
        FrameSegment {
            rect: Rect::new(g.left_x, g.y, bar_width, -g.density),
            x_left: g.left_x,
            x_right: g.left_x + bar_width,
            y_up: g.y,
            y_down: g.y - g.density,
        },
        FrameSegment {
            rect: Rect::new(g.left_x, g.y, g.density, -g.height),
            x_left: g.left_x,
            x_right: g.left_x + g.density,
            y_up: g.y,
            y_down: g.y - g.height,
        },
        FrameSegment {
            rect: Rect::new(g.left_x, bottom_bar_y, bar_width, -g.density),
            x_left: g.left_x,
            x_right: g.left_x + bar_width,
            y_up: bottom_bar_y,
            y_down: g.y - g.height,
        },
        FrameSegment {
            rect: Rect::new(right_bar_x, g.y, bar_width, -g.density),
            x_left: g.right_x,
            x_right: g.right_x + g.width,
            y_up: g.y,
            y_down: g.y - g.density,
        },
        FrameSegment {
            rect: Rect::new(right_post_x, g.y, g.density, -g.height),
            x_left: right_post_x,
            x_right: g.right_x + g.width,
            y_up: g.y,
            y_down: g.y - g.height,
        },
        FrameSegment {
            rect: Rect::new(right_bar_x, bottom_bar_y, bar_width, -g.density),
            x_left: g.right_x,
            x_right: g.right_x + g.width,
            y_up: bottom_bar_y,
            y_down: g.y - g.height,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::observation::Vision;
    use crate::spec::SizeClass;
    use proptest::prelude::*;

    fn kid_field() -> FieldModel {
        FieldModel::new(SizeClass::Kid.field())
    }

    fn agent_at(x: f64, y: f64, radius: f64) -> Agent {
        Agent::new(-1.0, DVec2::new(x, y), radius, "red", 0.0, Vision::default())
    }

    #[test]
    fn test_apply_shot_points_away_from_agent() {
        let mut ball = Ball::new(DVec2::new(0.0, 16.0), 0.26, "yellow");
        let agent = agent_at(-1.0, 15.0, 0.8);
        ball.apply_shot(&agent, SHOT_POWER);
        assert!(ball.vel.x > 0.0);
        assert!(ball.vel.y > 0.0);
        assert_eq!(ball.vel, DVec2::new(6.0, 6.0));
    }

    #[test]
    fn test_is_colliding_uses_strict_overlap() {
        let ball = Ball::new(DVec2::new(0.0, 16.0), 1.0, "yellow");
        assert!(ball.is_colliding(&agent_at(1.5, 16.0, 1.0)));
        assert!(!ball.is_colliding(&agent_at(2.0, 16.0, 1.0)));
        assert_eq!(ball.squared_distance(&agent_at(3.0, 20.0, 1.0)), 25.0);
    }

    #[test]
    fn test_player_collision_separates_along_normal() {
        let mut ball = Ball::new(DVec2::new(0.0, 16.0), 1.0, "yellow");
        let agent = agent_at(-1.0, 16.0, 1.0);
        ball.resolve_player_collision(&agent);

        assert!(!ball.is_colliding(&agent));
        // Pushed straight along +x, y untouched
        assert!(ball.pos.x > 0.0);
        assert_eq!(ball.pos.y, 16.0);
    }

    #[test]
    fn test_player_collision_reflects_incoming_velocity() {
        let mut ball = Ball::new(DVec2::new(0.0, 16.0), 1.0, "yellow");
        ball.vel = DVec2::new(-10.0, 0.0);
        let agent = agent_at(-1.5, 16.0, 1.0);
        ball.resolve_player_collision(&agent);
        assert!((ball.vel.x - 1.0).abs() < 1e-12);
        assert!(ball.vel.y.abs() < 1e-12);
    }

    #[test]
    fn test_player_collision_zero_distance_is_noop() {
        let mut ball = Ball::new(DVec2::new(0.0, 16.0), 1.0, "yellow");
        ball.vel = DVec2::new(3.0, 4.0);
        let agent = agent_at(0.0, 16.0, 1.0);
        let before = ball.clone();
        ball.resolve_player_collision(&agent);
        assert_eq!(ball, before);
    }

    #[test]
    fn test_goal_collision_back_post_bounces() {
        let field = kid_field();
        let g = field.goals;
        // Moving left into the inside face of the left goal's back post
        let post_inner = g.left_x + g.density;
        let mut ball = Ball::new(DVec2::new(post_inner + 0.1, 16.0), 0.26, "yellow");
        ball.vel = DVec2::new(-5.0, 0.0);
        ball.resolve_goal_collision(&field);
        assert!((ball.pos.x - (post_inner + 0.26)).abs() < 1e-12);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_goal_collision_right_back_post_bounces() {
        let field = kid_field();
        let g = field.goals;
        let post_inner = g.right_x + g.width - g.density;
        let mut ball = Ball::new(DVec2::new(post_inner - 0.1, 16.0), 0.26, "yellow");
        ball.vel = DVec2::new(5.0, 0.0);
        ball.resolve_goal_collision(&field);
        assert!((ball.pos.x - (post_inner - 0.26)).abs() < 1e-12);
        assert!((ball.vel.x + 5.0 * FRICTION).abs() < 1e-12);
        assert_eq!(ball.pos.y, 16.0);
    }

    #[test]
    fn test_goal_collision_corner_corrects_both_axes() {
        let field = kid_field();
        let g = field.goals;
        // Inside the right goal, touching the back post and the top bar at once
        let post_inner = g.right_x + g.width - g.density;
        let bar_inner = g.y - g.density;
        let mut ball = Ball::new(DVec2::new(post_inner - 0.1, bar_inner - 0.1), 0.26, "yellow");
        ball.vel = DVec2::new(5.0, 5.0);
        ball.resolve_goal_collision(&field);

        assert!((ball.pos.x - (post_inner - 0.26)).abs() < 1e-12);
        assert!((ball.pos.y - (bar_inner - 0.26)).abs() < 1e-12);
        assert!((ball.vel.x + 5.0 * FRICTION).abs() < 1e-12);
        assert!((ball.vel.y + 5.0 * FRICTION).abs() < 1e-12);
    }

    #[test]
    fn test_goal_collision_ignores_open_field() {
        let field = kid_field();
        let mut ball = Ball::new(DVec2::new(0.0, 16.0), 0.26, "yellow");
        ball.vel = DVec2::new(5.0, -2.0);
        let before = ball.clone();
        ball.resolve_goal_collision(&field);
        assert_eq!(ball, before);
    }

    #[test]
    fn test_update_applies_friction_in_open_play() {
        let field = kid_field();
        let mut ball = Ball::new(DVec2::new(0.0, 16.0), 0.26, "yellow");
        ball.vel = DVec2::new(3.0, -1.5);
        ball.update(&field);
        assert_eq!(ball.prev_pos, DVec2::new(0.0, 16.0));
        assert!((ball.vel.x - 3.0 * FRICTION).abs() < 1e-12);
        assert!((ball.vel.y + 1.5 * FRICTION).abs() < 1e-12);
        assert!((ball.pos.x - 3.0 * TIMESTEP).abs() < 1e-12);
    }

    #[test]
    fn test_update_bounces_off_field_edge() {
        let field = kid_field();
        let half = field.field_width() / 2.0;
        let mut ball = Ball::new(DVec2::new(0.0, 31.9), 0.26, "yellow");
        ball.vel = DVec2::new(0.0, 9.0);
        ball.update(&field);
        assert_eq!(ball.pos.y, field.field_height() - 0.26);
        assert!(ball.vel.y < 0.0);

        let mut ball = Ball::new(DVec2::new(-half + 0.3, 2.0), 0.26, "yellow");
        ball.vel = DVec2::new(-9.0, 0.0);
        ball.update(&field);
        assert_eq!(ball.pos.x, -half + 0.26);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_reset_position() {
        let mut ball = Ball::new(DVec2::new(0.0, 16.0), 0.26, "yellow");
        ball.pos = DVec2::new(5.0, 5.0);
        ball.vel = DVec2::new(1.0, 1.0);
        ball.reset_position();
        assert_eq!(ball.pos, ball.init_pos);
        assert_eq!(ball.vel, DVec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_ball_stays_inside_field(
            x in -21.0f64..21.0, y in 0.5f64..31.5,
            vx in -200.0f64..200.0, vy in -200.0f64..200.0,
        ) {
            let field = kid_field();
            let mut ball = Ball::new(DVec2::new(x, y), 0.26, "yellow");
            ball.vel = DVec2::new(vx, vy);
            for _ in 0..30 {
                ball.update(&field);
                let half = field.field_width() / 2.0;
                prop_assert!(ball.pos.x - ball.radius >= -half - 1e-9);
                prop_assert!(ball.pos.x + ball.radius <= half + 1e-9);
                prop_assert!(ball.pos.y >= 0.0);
                prop_assert!(ball.pos.y <= field.field_height());
            }
        }

        #[test]
        fn prop_friction_decay_in_open_play(
            vx in -3.0f64..3.0, vy in -3.0f64..3.0,
        ) {
            // Near the centre spot a 3 unit/s ball cannot reach any edge in one tick
            let field = kid_field();
            let mut ball = Ball::new(DVec2::new(0.0, 16.0), 0.26, "yellow");
            ball.vel = DVec2::new(vx, vy);
            ball.update(&field);
            prop_assert!((ball.vel.x - vx * FRICTION).abs() < 1e-12);
            prop_assert!((ball.vel.y - vy * FRICTION).abs() < 1e-12);
        }
    }
}
