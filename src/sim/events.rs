//! Rule diagnostics raised during a tick
//!
//! Events are informational. They are logged as they happen and buffered
//! until the caller drains them; nothing in the simulation reads them back.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Side;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    /// `agent`'s move was vetoed because it would overlap `other`
    AgentCollision { agent: String, other: String },
    AgentOutsideSideline { agent: String },
    AgentOutsideGoalLine { agent: String },
    BallOutsideSideline { last_touched: Option<String> },
    BallOutsideGoalLine { last_touched: Option<String> },
    Goal {
        scorer: Side,
        team_left_points: u32,
        team_right_points: u32,
    },
    /// Ball and agents went back to the kick-off layout
    KickOff,
    Halftime,
    MatchEnd {
        team_left_points: u32,
        team_right_points: u32,
    },
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toucher = |t: &Option<String>| t.clone().unwrap_or_else(|| "nobody".to_string());
        match self {
            MatchEvent::AgentCollision { agent, other } => {
                write!(f, "collision: {agent} blocked by {other}")
            }
            MatchEvent::AgentOutsideSideline { agent } => {
                write!(f, "{agent} is outside the sideline")
            }
            MatchEvent::AgentOutsideGoalLine { agent } => {
                write!(f, "{agent} is outside the goal line")
            }
            MatchEvent::BallOutsideSideline { last_touched } => {
                write!(f, "ball out over the sideline, last touched by {}", toucher(last_touched))
            }
            MatchEvent::BallOutsideGoalLine { last_touched } => {
                write!(f, "ball out over the goal line, last touched by {}", toucher(last_touched))
            }
            MatchEvent::Goal {
                scorer,
                team_left_points,
                team_right_points,
            } => write!(
                f,
                "goal for the {} team ({team_left_points} - {team_right_points})",
                scorer.as_str()
            ),
            MatchEvent::KickOff => write!(f, "kick-off"),
            MatchEvent::Halftime => write!(f, "halftime, teams switch sides"),
            MatchEvent::MatchEnd {
                team_left_points,
                team_right_points,
            } => write!(f, "match over ({team_left_points} - {team_right_points})"),
        }
    }
}

/// Logs and buffers match events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: MatchEvent) {
        match &event {
            MatchEvent::AgentCollision { .. }
            | MatchEvent::AgentOutsideSideline { .. }
            | MatchEvent::AgentOutsideGoalLine { .. } => log::debug!("{event}"),
            _ => log::info!("{event}"),
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drain everything buffered so far
    pub fn take(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_then_take_drains() {
        let mut log = EventLog::new();
        log.emit(MatchEvent::KickOff);
        log.emit(MatchEvent::BallOutsideSideline { last_touched: None });
        assert_eq!(log.len(), 2);

        let drained = log.take();
        assert_eq!(drained[0], MatchEvent::KickOff);
        assert!(log.is_empty());
    }

    #[test]
    fn test_display() {
        let goal = MatchEvent::Goal {
            scorer: Side::Right,
            team_left_points: 0,
            team_right_points: 1,
        };
        assert_eq!(goal.to_string(), "goal for the right team (0 - 1)");
        let out = MatchEvent::BallOutsideGoalLine {
            last_touched: Some("purple".into()),
        };
        assert!(out.to_string().ends_with("purple"));
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_string(&MatchEvent::Halftime).unwrap();
        assert_eq!(json, r#"{"type":"halftime"}"#);
    }
}
