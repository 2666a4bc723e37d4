//! RoboCup Env - A deterministic 2D multi-agent soccer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, rules, match loop)
//! - `spec`: Size-class presets (field, ball, robot dimensions)
//! - `builder`: Wires a complete match from a roster and configuration flags
//! - `env`: Step/reset wrapper consumed by training harnesses
//! - `settings`: Serializable environment settings
//! - `policy`: Seeded random controller

pub mod builder;
pub mod env;
pub mod error;
pub mod policy;
pub mod settings;
pub mod sim;
pub mod spec;

pub use builder::GameBuilder;
pub use env::{RoboCupEnv, StepInfo, StepResult, observation_length};
pub use error::{Result, RobocupError};
pub use policy::RandomPolicy;
pub use settings::{ClockMode, ConfigFlag, EnvSettings};
pub use spec::SizeClass;

use glam::DVec2;

/// A 2D coordinate in simulation units
pub type Point = DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz)
    pub const TIMESTEP: f64 = 1.0 / 30.0;

    /// Step used to push the ball out of an agent's body
    pub const NUDGE: f64 = 0.1;
    /// Velocity multiplier applied every tick and on every bounce (1 means no friction)
    pub const FRICTION: f64 = 0.95;
    /// Blend factor between reflected velocity and pusher velocity
    pub const COLLISION_BLEND: f64 = 0.1;
    /// Shot impulse multiplier
    pub const SHOT_POWER: f64 = 6.0;

    /// Agent speeds (simulation units per second along the heading)
    pub const PLAYER_SPEED_FORWARD: f64 = 6.5 * 0.5;
    pub const PLAYER_SPEED_BACKWARD: f64 = 6.5 * 0.5;
    pub const PLAYER_SPEED_LEFT: f64 = 2.0;
    pub const PLAYER_SPEED_RIGHT: f64 = PLAYER_SPEED_LEFT;

    /// Degrees per tick for a rotate intent
    pub const ROTATION_STEP: f64 = 1.0;

    /// Eye anchors sit at this angular offset from the heading, at 3/4 radius
    pub const EYE_ANGLE_OFFSET: f64 = 29.0;
    /// Body radius divided by this gives the shot hitbox radius
    pub const HITBOX_RADIUS_DIVISOR: f64 = 1.5;

    /// Match timing (seconds)
    pub const MATCH_MAX_TIME: f64 = 600.0;
    pub const MATCH_MID_TIME: f64 = 300.0;
    /// The match ends when either side reaches this score
    pub const MAX_POINTS: u32 = 5;
    /// Frames the ball is held before play
    pub const INIT_DELAY_FRAMES: u32 = 30;

    /// Observations are divided by this before being handed out
    pub const OBSERVATION_SCALE: f64 = 10.0;
    /// Simulation units per real-world meter
    pub const CARTESIAN_FACTOR: f64 = 4.0;

    /// Total controllable agent slots (slot 0 plus three additional)
    pub const MAX_AGENTS: usize = 4;
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate `point` about `origin` by `angle_degrees` (counter-clockwise)
#[inline]
pub fn rotate_point(point: Point, origin: Point, angle_degrees: f64) -> Point {
    let theta = angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let d = point - origin;
    DVec2::new(cos * d.x - sin * d.y + origin.x, sin * d.x + cos * d.y + origin.y)
}

/// Offset `point` along `angle_degrees` with independent x/y radii
#[inline]
pub fn polar_offset(point: Point, angle_degrees: f64, radius_x: f64, radius_y: f64) -> Point {
    let theta = angle_degrees.to_radians();
    DVec2::new(point.x + radius_x * theta.cos(), point.y + radius_y * theta.sin())
}
