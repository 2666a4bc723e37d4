//! Match state
//!
//! `Game` is the composition root: field, both teams, ball, referee and the
//! halftime multiplier. The state captured at construction is kept so the
//! whole match can be rewound.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Side;
use super::agent::Agent;
use super::ball::Ball;
use super::events::{EventLog, MatchEvent};
use super::field::FieldModel;
use super::referee::Referee;
use super::team::Team;
use crate::consts::INIT_DELAY_FRAMES;

/// Countdown before the ball is released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayScreen {
    life: u32,
}

impl Default for DelayScreen {
    fn default() -> Self {
        Self::new(INIT_DELAY_FRAMES)
    }
}

impl DelayScreen {
    pub fn new(life: u32) -> Self {
        Self { life }
    }

    pub fn reset(&mut self, life: u32) {
        self.life = life;
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    /// True once the countdown has run out, otherwise counts down one frame
    pub fn status(&mut self) -> bool {
        if self.life == 0 {
            return true;
        }
        self.life -= 1;
        false
    }
}

/// Everything `Game::reset` restores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MatchSnapshot {
    team_left: Team,
    team_right: Team,
    ball: Ball,
    referee: Referee,
    delay_screen: DelayScreen,
    halftime: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub field: FieldModel,
    pub team_left: Team,
    pub team_right: Team,
    pub ball: Ball,
    pub referee: Referee,
    pub delay_screen: DelayScreen,
    /// +1 in the first half, -1 once the teams have switched sides
    pub halftime: i32,
    /// Color whose perspective rewards are reported from
    pub trained_color: String,
    #[serde(skip)]
    pub(crate) events: EventLog,
    initial: MatchSnapshot,
}

impl Game {
    pub fn new(
        field: FieldModel,
        mut team_left: Team,
        mut team_right: Team,
        ball: Ball,
        referee: Referee,
        delay_screen: DelayScreen,
        trained_color: impl Into<String>,
    ) -> Self {
        team_left.update_state(&ball, team_right.agents());
        team_right.update_state(&ball, team_left.agents());

        let initial = MatchSnapshot {
            team_left: team_left.clone(),
            team_right: team_right.clone(),
            ball: ball.clone(),
            referee: referee.clone(),
            delay_screen,
            halftime: 1,
        };

        Self {
            field,
            team_left,
            team_right,
            ball,
            referee,
            delay_screen,
            halftime: 1,
            trained_color: trained_color.into(),
            events: EventLog::new(),
            initial,
        }
    }

    /// Dead ball: everyone back to kick-off. Scores and halftime are kept.
    pub fn new_match(&mut self) {
        self.ball.reset_position();
        self.team_left.reset_position();
        self.team_right.reset_position();
        self.referee.clear_last_touched();
        self.events.emit(MatchEvent::KickOff);
    }

    /// Teams switch ends; scoring signs flip with them
    pub fn midgame_event(&mut self) {
        self.ball.reset_position();
        self.team_left.reset_position_after_halftime();
        self.team_right.reset_position_after_halftime();
        self.halftime = -1;
        self.referee.clear_last_touched();
        self.events.emit(MatchEvent::Halftime);
    }

    /// Rewind to the state at construction, scores included
    pub fn reset(&mut self) {
        let MatchSnapshot {
            team_left,
            team_right,
            ball,
            referee,
            delay_screen,
            halftime,
        } = self.initial.clone();
        self.team_left = team_left;
        self.team_right = team_right;
        self.ball = ball;
        self.referee = referee;
        self.delay_screen = delay_screen;
        self.halftime = halftime;
        self.events = EventLog::new();
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Left => &self.team_left,
            Side::Right => &self.team_right,
        }
    }

    /// Which side the agent with `color` plays on
    pub fn side_of(&self, color: &str) -> Option<Side> {
        if self.team_left.contains(color) {
            Some(Side::Left)
        } else if self.team_right.contains(color) {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn agent(&self, color: &str) -> Option<&Agent> {
        self.team_left
            .agent(color)
            .or_else(|| self.team_right.agent(color))
    }

    pub fn agent_mut(&mut self, color: &str) -> Option<&mut Agent> {
        match self.side_of(color)? {
            Side::Left => self.team_left.agent_mut(color),
            Side::Right => self.team_right.agent_mut(color),
        }
    }

    /// Turn a left-goal-positive result into the trained agent's point of view
    pub fn from_trained_perspective(&self, result: i32) -> i32 {
        if self.team_left.contains(&self.trained_color) {
            -result
        } else {
            result
        }
    }

    pub fn trained_observation(&self) -> Vec<f64> {
        self.agent(&self.trained_color)
            .map(Agent::observation)
            .unwrap_or_default()
    }

    /// Observations of every agent except the trained one, keyed by color
    pub fn other_observations(&self) -> BTreeMap<String, Vec<f64>> {
        self.team_left
            .observations()
            .into_iter()
            .chain(self.team_right.observations())
            .filter(|(color, _)| *color != self.trained_color)
            .collect()
    }

    /// Rebuild both teams' observations from current positions
    pub fn refresh_observations(&mut self) {
        self.team_left.update_state(&self.ball, self.team_right.agents());
        self.team_right.update_state(&self.ball, self.team_left.agents());
    }

    pub fn events(&self) -> &[MatchEvent] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<MatchEvent> {
        self.events.take()
    }

    /// Record an event raised outside the tick (for example, match end)
    pub fn emit(&mut self, event: MatchEvent) {
        self.events.emit(event);
    }
}
