//! Deterministic simulation module
//!
//! All match logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (roster order, left side before right side)
//! - No platform dependencies

pub mod action;
pub mod agent;
pub mod ball;
pub mod collision;
pub mod events;
pub mod field;
pub mod observation;
pub mod referee;
pub mod state;
pub mod team;
pub mod tick;

use serde::{Deserialize, Serialize};

pub use action::Action;
pub use agent::{Agent, Anchors};
pub use ball::Ball;
pub use collision::{Rect, RectContact, circle_circle_collision, circle_rect_collision};
pub use events::{EventLog, MatchEvent};
pub use field::{FieldModel, GoalLineBox, Goals, MiddleLine, SideLine};
pub use observation::{RelativeState, Vision};
pub use referee::Referee;
pub use state::{DelayScreen, Game};
pub use team::Team;
pub use tick::{TickInput, TickOutcome, tick};

/// Which half of the field a team starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Side direction multiplier used for mirroring
    pub fn direction(&self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
