//! Environment settings
//!
//! Everything needed to build a match: size class, both rosters, rule and
//! vision flags, clock mode and seed. Loaded from and saved to JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RobocupError};
use crate::sim::Vision;
use crate::spec::SizeClass;

/// Optional behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigFlag {
    /// Agents may walk through each other
    CollisionDisable,
    /// Report detected agent collisions in the tick outcome
    PenaltyCollisionEnable,
    /// Drop teammates from observations
    AlliesVisionDisable,
    /// Drop opponents from observations
    OpponentsVisionDisable,
}

impl ConfigFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFlag::CollisionDisable => "collision_disable",
            ConfigFlag::PenaltyCollisionEnable => "penalty_collision_enable",
            ConfigFlag::AlliesVisionDisable => "allies_vision_disable",
            ConfigFlag::OpponentsVisionDisable => "opponents_vision_disable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "collision_disable" => Some(ConfigFlag::CollisionDisable),
            "penalty_collision_enable" => Some(ConfigFlag::PenaltyCollisionEnable),
            "allies_vision_disable" => Some(ConfigFlag::AlliesVisionDisable),
            "opponents_vision_disable" => Some(ConfigFlag::OpponentsVisionDisable),
            _ => None,
        }
    }

    /// Parse a list of flag names, rejecting anything unknown
    pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>> {
        names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                Self::from_str(n).ok_or_else(|| RobocupError::UnknownFlag(n.to_string()))
            })
            .collect()
    }
}

/// Flags resolved into the switches the simulation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub collision_enable: bool,
    pub penalty_collision_enable: bool,
    pub vision: Vision,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from_flags(&[])
    }
}

impl BuildOptions {
    pub fn from_flags(flags: &[ConfigFlag]) -> Self {
        let has = |f: ConfigFlag| flags.contains(&f);
        Self {
            collision_enable: !has(ConfigFlag::CollisionDisable),
            penalty_collision_enable: has(ConfigFlag::PenaltyCollisionEnable),
            vision: Vision {
                allies: !has(ConfigFlag::AlliesVisionDisable),
                opponents: !has(ConfigFlag::OpponentsVisionDisable),
            },
        }
    }
}

/// How elapsed match time is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    /// Ticks times the fixed timestep; reproducible
    #[default]
    Simulated,
    /// Real time since the episode started
    WallClock,
}

impl ClockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockMode::Simulated => "simulated",
            ClockMode::WallClock => "wall_clock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simulated" | "sim" => Some(ClockMode::Simulated),
            "wall_clock" | "wallclock" | "wall" => Some(ClockMode::WallClock),
            _ => None,
        }
    }
}

/// One roster entry: an agent color and the action slot that drives it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSlot {
    pub color: String,
    pub slot: usize,
}

impl AgentSlot {
    pub fn new(color: impl Into<String>, slot: usize) -> Self {
        Self {
            color: color.into(),
            slot,
        }
    }
}

/// Environment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSettings {
    pub size: SizeClass,
    /// Left roster, top to bottom
    pub team_left: Vec<AgentSlot>,
    /// Right roster, top to bottom
    pub team_right: Vec<AgentSlot>,
    pub flags: Vec<ConfigFlag>,
    pub clock: ClockMode,
    pub seed: u64,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            size: SizeClass::Kid,
            team_left: vec![AgentSlot::new("purple", 0), AgentSlot::new("green", 1)],
            team_right: vec![AgentSlot::new("yellow", 2), AgentSlot::new("white", 3)],
            flags: Vec::new(),
            clock: ClockMode::Simulated,
            seed: 0,
        }
    }
}

impl EnvSettings {
    pub fn with_size(size: SizeClass) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::from_flags(&self.flags)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}
