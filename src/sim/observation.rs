//! Perspective-relative observation vectors
//!
//! Every agent sees the match as if it were attacking the same way: x
//! coordinates and x velocities are multiplied by the agent's side direction.
//! The vector is laid out as `[self, ball, allies..., opponents...]`, four
//! values per body `(x, y, vx, vy)`, then divided by `OBSERVATION_SCALE`.

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::ball::Ball;
use crate::consts::OBSERVATION_SCALE;

/// Values contributed by one body
pub const VALUES_PER_BODY: usize = 4;

/// Which optional blocks an agent observes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vision {
    pub allies: bool,
    pub opponents: bool,
}

impl Default for Vision {
    fn default() -> Self {
        Self {
            allies: true,
            opponents: true,
        }
    }
}

impl Vision {
    /// Observation length for an agent with `allies` teammates and `opponents` rivals
    pub fn observation_length(&self, allies: usize, opponents: usize) -> usize {
        let mut bodies = 2;
        if self.allies {
            bodies += allies;
        }
        if self.opponents {
            bodies += opponents;
        }
        bodies * VALUES_PER_BODY
    }

    /// Build the raw (unscaled) observation for `agent`
    pub fn observe<'a>(
        &self,
        agent: &Agent,
        ball: &Ball,
        allies: impl IntoIterator<Item = &'a Agent>,
        opponents: &[Agent],
    ) -> Vec<f64> {
        let dir = agent.direction;
        let mut raw = Vec::with_capacity(8);

        push_body(&mut raw, agent.pos.x, agent.pos.y, agent.vel.x, agent.vel.y, dir);
        push_body(&mut raw, ball.pos.x, ball.pos.y, ball.vel.x, ball.vel.y, dir);

        if self.allies {
            for ally in allies {
                push_body(&mut raw, ally.pos.x, ally.pos.y, ally.vel.x, ally.vel.y, dir);
            }
        }
        if self.opponents {
            for opp in opponents {
                push_body(&mut raw, opp.pos.x, opp.pos.y, opp.vel.x, opp.vel.y, -dir);
            }
        }
        raw
    }
}

#[inline]
fn push_body(out: &mut Vec<f64>, x: f64, y: f64, vx: f64, vy: f64, dir: f64) {
    out.extend_from_slice(&[x * dir, y, vx * dir, vy]);
}

/// An agent's last observation plus the vision it was built with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeState {
    pub vision: Vision,
    raw: Vec<f64>,
}

impl RelativeState {
    pub fn new(vision: Vision) -> Self {
        Self {
            vision,
            raw: Vec::new(),
        }
    }

    pub fn set_raw(&mut self, raw: Vec<f64>) {
        self.raw = raw;
    }

    pub fn raw(&self) -> &[f64] {
        &self.raw
    }

    /// Scaled observation handed to controllers
    pub fn observation(&self) -> Vec<f64> {
        self.raw.iter().map(|v| v / OBSERVATION_SCALE).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn agent(dir: f64, x: f64, y: f64, color: &str) -> Agent {
        Agent::new(dir, DVec2::new(x, y), 0.8, color, 0.0, Vision::default())
    }

    #[test]
    fn test_observation_length_by_vision() {
        let full = Vision::default();
        assert_eq!(full.observation_length(1, 2), 20);
        let no_allies = Vision { allies: false, opponents: true };
        assert_eq!(no_allies.observation_length(1, 2), 16);
        let no_opponents = Vision { allies: true, opponents: false };
        assert_eq!(no_opponents.observation_length(1, 2), 12);
        let blind = Vision { allies: false, opponents: false };
        assert_eq!(blind.observation_length(1, 2), 8);
    }

    #[test]
    fn test_observe_mirrors_x_for_direction() {
        let me = agent(-1.0, -4.0, 14.0, "red");
        let mate = agent(-1.0, -4.0, 18.0, "pink");
        let rival = agent(1.0, 4.0, 14.0, "blue");
        let mut ball = Ball::new(DVec2::new(2.0, 16.0), 0.26, "yellow");
        ball.vel = DVec2::new(1.0, -1.0);

        let raw = Vision::default().observe(&me, &ball, [&mate], std::slice::from_ref(&rival));
        assert_eq!(raw.len(), 16);
        assert_eq!(&raw[0..4], &[4.0, 14.0, -0.0, 0.0]);
        assert_eq!(&raw[4..8], &[-2.0, 16.0, -1.0, -1.0]);
        assert_eq!(&raw[8..12], &[4.0, 18.0, -0.0, 0.0]);
        // Opponents use the opposite sign
        assert_eq!(&raw[12..16], &[4.0, 14.0, 0.0, 0.0]);
    }

    #[test]
    fn test_observation_is_scaled() {
        let mut state = RelativeState::new(Vision::default());
        state.set_raw(vec![10.0, -20.0, 5.0, 0.0]);
        assert_eq!(state.observation(), vec![1.0, -2.0, 0.5, 0.0]);
        assert_eq!(state.raw().len(), 4);
    }
}
