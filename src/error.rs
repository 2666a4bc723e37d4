//! Error types for match construction, stepping and settings loading

use thiserror::Error;

use crate::sim::Side;

#[derive(Debug, Error)]
pub enum RobocupError {
    #[error("agent '{color}' uses action slot {slot}, expected a slot in 0..=3")]
    SlotOutOfRange { color: String, slot: usize },

    #[error("action slot {slot} is assigned to more than one agent")]
    DuplicateSlot { slot: usize },

    #[error("agent color '{color}' is used more than once")]
    DuplicateColor { color: String },

    #[error("no agent is mapped to action slot 0")]
    MissingTrainedAgent,

    #[error("{side:?} team has no agents")]
    EmptyTeam { side: Side },

    #[error("received {given} additional actions, at most {max} are allowed")]
    TooManyActions { given: usize, max: usize },

    #[error("unknown configuration flag '{0}'")]
    UnknownFlag(String),

    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RobocupError>;
