//! Step/reset wrapper for training harnesses
//!
//! Owns one match plus the match clock. Each `step` feeds the trained
//! agent's action (slot 0) and up to three more, advances one tick, and
//! handles halftime and match end.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::builder::GameBuilder;
use crate::consts::*;
use crate::error::{Result, RobocupError};
use crate::settings::{BuildOptions, ClockMode, ConfigFlag, EnvSettings};
use crate::sim::{Action, Game, MatchEvent, TickInput, TickOutcome, tick};
use crate::spec::SizeClass;

/// Per-step side information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub team_left_points: u32,
    pub team_right_points: u32,
    /// Observations of every non-trained agent, keyed by color
    pub other_observations: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Vec<f64>,
    /// -1, 0 or +1 from the trained agent's side
    pub reward: i32,
    pub done: bool,
    pub info: StepInfo,
    pub outcome: TickOutcome,
}

/// Observation length for the 2v2 layout under the given flags
pub fn observation_length(flags: &[ConfigFlag]) -> usize {
    BuildOptions::from_flags(flags).vision.observation_length(1, 2)
}

#[derive(Debug)]
pub struct RoboCupEnv {
    settings: EnvSettings,
    game: Game,
    ticks: u64,
    started: Instant,
    halftime_done: bool,
    match_over: bool,
}

impl RoboCupEnv {
    pub fn new(settings: EnvSettings) -> Result<Self> {
        let game = GameBuilder::from_settings(&settings).build()?;
        log::info!(
            "RoboCup env ready: {} size, clock {}, seed {}",
            settings.size.as_str(),
            settings.clock.as_str(),
            settings.seed
        );
        Ok(Self {
            settings,
            game,
            ticks: 0,
            started: Instant::now(),
            halftime_done: false,
            match_over: false,
        })
    }

    /// Reference 2v2 KidSize match with the given flags
    pub fn kid_size(flags: &[ConfigFlag]) -> Result<Self> {
        Self::with_size(SizeClass::Kid, flags)
    }

    /// Reference 2v2 AdultSize match with the given flags
    pub fn adult_size(flags: &[ConfigFlag]) -> Result<Self> {
        Self::with_size(SizeClass::Adult, flags)
    }

    fn with_size(size: SizeClass, flags: &[ConfigFlag]) -> Result<Self> {
        let mut settings = EnvSettings::with_size(size);
        settings.flags = flags.to_vec();
        Self::new(settings)
    }

    pub fn settings(&self) -> &EnvSettings {
        &self.settings
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn observation_length(&self) -> usize {
        self.game.trained_observation().len()
    }

    /// Match time in seconds under the configured clock
    pub fn elapsed_seconds(&self) -> f64 {
        match self.settings.clock {
            ClockMode::Simulated => self.ticks as f64 * TIMESTEP,
            ClockMode::WallClock => self.started.elapsed().as_secs_f64(),
        }
    }

    /// Advance one tick
    ///
    /// `additional` holds the actions for slots 1, 2 and 3 in order; slots
    /// without an action stay idle.
    pub fn step(&mut self, action: Action, additional: &[Action]) -> Result<StepResult> {
        let max = MAX_AGENTS - 1;
        if additional.len() > max {
            return Err(RobocupError::TooManyActions {
                given: additional.len(),
                max,
            });
        }

        let mut actions = Vec::with_capacity(MAX_AGENTS);
        actions.push(action);
        actions.extend_from_slice(additional);

        let outcome = tick(&mut self.game, &TickInput::new(actions));
        self.ticks += 1;
        let observation = self.game.trained_observation();

        let elapsed = self.elapsed_seconds();
        if !self.halftime_done && elapsed > MATCH_MID_TIME {
            self.game.midgame_event();
            self.halftime_done = true;
        }

        let left = self.game.team_left.points();
        let right = self.game.team_right.points();
        let done = left >= MAX_POINTS || right >= MAX_POINTS || elapsed > MATCH_MAX_TIME;
        if done && !self.match_over {
            self.game.emit(MatchEvent::MatchEnd {
                team_left_points: left,
                team_right_points: right,
            });
            self.match_over = true;
        }

        Ok(StepResult {
            observation,
            reward: outcome.reward,
            done,
            info: StepInfo {
                team_left_points: left,
                team_right_points: right,
                other_observations: self.game.other_observations(),
            },
            outcome,
        })
    }

    /// Start a fresh match and return the trained agent's first observation
    pub fn reset(&mut self) -> Vec<f64> {
        self.game.reset();
        self.ticks = 0;
        self.started = Instant::now();
        self.halftime_done = false;
        self.match_over = false;
        self.game.trained_observation()
    }

    /// Record the seed. The simulation itself has no randomness.
    pub fn seed(&mut self, seed: u64) -> u64 {
        self.settings.seed = seed;
        seed
    }

    pub fn take_events(&mut self) -> Vec<MatchEvent> {
        self.game.take_events()
    }
}
