//! Match construction
//!
//! Turns a size class, two rosters and a flag list into a fully wired
//! `Game`. The roster is validated up front; nothing is built from a bad one.

use std::collections::HashSet;

use glam::DVec2;

use crate::consts::MAX_AGENTS;
use crate::error::{Result, RobocupError};
use crate::settings::{AgentSlot, BuildOptions, ConfigFlag, EnvSettings};
use crate::sim::{Agent, Ball, DelayScreen, FieldModel, Game, Referee, Side, Team};
use crate::spec::SizeClass;

/// Team names by side
pub const TEAM_LEFT_NAME: &str = "red";
pub const TEAM_RIGHT_NAME: &str = "blue";
pub const BALL_COLOR: &str = "yellow";

#[derive(Debug, Clone)]
pub struct GameBuilder {
    size: SizeClass,
    team_left: Vec<AgentSlot>,
    team_right: Vec<AgentSlot>,
    flags: Vec<ConfigFlag>,
}

impl GameBuilder {
    /// Builder with the reference 2v2 roster
    pub fn new(size: SizeClass) -> Self {
        let defaults = EnvSettings::with_size(size);
        Self {
            size,
            team_left: defaults.team_left,
            team_right: defaults.team_right,
            flags: Vec::new(),
        }
    }

    pub fn kid_size() -> Self {
        Self::new(SizeClass::Kid)
    }

    pub fn adult_size() -> Self {
        Self::new(SizeClass::Adult)
    }

    pub fn from_settings(settings: &EnvSettings) -> Self {
        Self {
            size: settings.size,
            team_left: settings.team_left.clone(),
            team_right: settings.team_right.clone(),
            flags: settings.flags.clone(),
        }
    }

    pub fn team_left(mut self, roster: Vec<AgentSlot>) -> Self {
        self.team_left = roster;
        self
    }

    pub fn team_right(mut self, roster: Vec<AgentSlot>) -> Self {
        self.team_right = roster;
        self
    }

    pub fn flags(mut self, flags: &[ConfigFlag]) -> Self {
        self.flags = flags.to_vec();
        self
    }

    /// Check the rosters and return the trained agent's color
    ///
    /// The trained agent is the one on slot 0, looked up on the left side first.
    pub fn validate(&self) -> Result<String> {
        if self.team_left.is_empty() {
            return Err(RobocupError::EmptyTeam { side: Side::Left });
        }
        if self.team_right.is_empty() {
            return Err(RobocupError::EmptyTeam { side: Side::Right });
        }

        let mut slots = HashSet::new();
        let mut colors = HashSet::new();
        for entry in self.team_left.iter().chain(&self.team_right) {
            if entry.slot >= MAX_AGENTS {
                return Err(RobocupError::SlotOutOfRange {
                    color: entry.color.clone(),
                    slot: entry.slot,
                });
            }
            if !slots.insert(entry.slot) {
                return Err(RobocupError::DuplicateSlot { slot: entry.slot });
            }
            if !colors.insert(entry.color.as_str()) {
                return Err(RobocupError::DuplicateColor {
                    color: entry.color.clone(),
                });
            }
        }

        self.team_left
            .iter()
            .chain(&self.team_right)
            .find(|e| e.slot == 0)
            .map(|e| e.color.clone())
            .ok_or(RobocupError::MissingTrainedAgent)
    }

    pub fn build(&self) -> Result<Game> {
        let trained_color = self.validate()?;
        let options = BuildOptions::from_flags(&self.flags);
        let field = FieldModel::new(self.size.field());

        let team_left = Team::new(
            TEAM_LEFT_NAME,
            self.place_agents(&field, &self.team_left, Side::Left, &options),
        );
        let team_right = Team::new(
            TEAM_RIGHT_NAME,
            self.place_agents(&field, &self.team_right, Side::Right, &options),
        );

        let ball_radius = self.size.ball().diameter / 2.0 * field.scale_meter();
        let ball = Ball::new(DVec2::new(0.0, field.center_y()), ball_radius, BALL_COLOR);

        let referee = Referee::new(options.collision_enable, options.penalty_collision_enable);

        log::debug!(
            "Built {} match: {} vs {}, trained agent '{}'",
            self.size.as_str(),
            team_left.len(),
            team_right.len(),
            trained_color
        );

        Ok(Game::new(
            field,
            team_left,
            team_right,
            ball,
            referee,
            DelayScreen::default(),
            trained_color,
        ))
    }

    /// Kick-off layout: one meter from the halfway line, stacked a meter apart
    fn place_agents(
        &self,
        field: &FieldModel,
        roster: &[AgentSlot],
        side: Side,
        options: &BuildOptions,
    ) -> Vec<(Agent, usize)> {
        let scale = field.scale_meter();
        let direction = side.direction();
        let angle = match side {
            Side::Left => 0.0,
            Side::Right => 180.0,
        };
        let radius = self.size.robot().diameter / 2.0 * scale;
        let top = field.center_y() - scale / 2.0;

        roster
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let pos = DVec2::new(direction * scale, top + i as f64 * scale);
                let agent = Agent::new(direction, pos, radius, &entry.color, angle, options.vision);
                (agent, entry.slot)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(entries: &[(&str, usize)]) -> Vec<AgentSlot> {
        entries.iter().map(|(c, s)| AgentSlot::new(*c, *s)).collect()
    }

    #[test]
    fn test_reference_layout() {
        let game = GameBuilder::kid_size().build().unwrap();
        assert_eq!(game.trained_color, "purple");
        assert_eq!(game.team_left.name, "red");
        assert_eq!(game.team_right.name, "blue");

        let purple = game.agent("purple").map(|a| (a.pos, a.direction, a.angle, a.radius));
        assert_eq!(purple, Some((DVec2::new(-4.0, 14.0), -1.0, 0.0, 0.8)));
        let white = game.agent("white").map(|a| (a.pos, a.direction, a.angle));
        assert_eq!(white, Some((DVec2::new(4.0, 18.0), 1.0, 180.0)));

        assert_eq!(game.ball.pos, DVec2::new(0.0, 16.0));
        assert!((game.ball.radius - 0.26).abs() < 1e-12);
        assert!(game.referee.collision_enable);
    }

    #[test]
    fn test_trained_agent_found_on_right_side() {
        let builder = GameBuilder::adult_size()
            .team_left(roster(&[("purple", 1)]))
            .team_right(roster(&[("white", 0)]));
        assert!(matches!(builder.validate().as_deref(), Ok("white")));
    }

    #[test]
    fn test_flags_reach_the_referee() {
        let game = GameBuilder::kid_size()
            .flags(&[ConfigFlag::CollisionDisable, ConfigFlag::PenaltyCollisionEnable])
            .build()
            .unwrap();
        assert!(!game.referee.collision_enable);
        assert!(game.referee.penalty_collision_enable);
    }

    #[test]
    fn test_rejects_bad_rosters() {
        let kid = GameBuilder::kid_size;

        let err = kid().team_left(roster(&[("purple", 0), ("green", 4)])).validate();
        assert!(matches!(err, Err(RobocupError::SlotOutOfRange { slot: 4, .. })));

        let err = kid().team_right(roster(&[("yellow", 1)])).validate();
        assert!(matches!(err, Err(RobocupError::DuplicateSlot { slot: 1 })));

        let err = kid().team_right(roster(&[("purple", 2)])).validate();
        assert!(matches!(err, Err(RobocupError::DuplicateColor { .. })));

        let err = kid()
            .team_left(roster(&[("purple", 1)]))
            .team_right(roster(&[("white", 2)]))
            .validate();
        assert!(matches!(err, Err(RobocupError::MissingTrainedAgent)));

        let err = kid().team_left(Vec::new()).validate();
        assert!(matches!(err, Err(RobocupError::EmptyTeam { side: Side::Left })));
    }
}
