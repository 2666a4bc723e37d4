//! One side's roster and score

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::agent::Agent;
use super::ball::Ball;
use super::field::FieldModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    agents: Vec<Agent>,
    /// Index into the per-tick action list, parallel to `agents`
    action_slots: Vec<usize>,
    points: u32,
}

impl Team {
    pub fn new(name: impl Into<String>, members: Vec<(Agent, usize)>) -> Self {
        let (agents, action_slots): (Vec<Agent>, Vec<usize>) = members.into_iter().unzip();
        Self {
            name: name.into(),
            agents,
            action_slots,
            points: 0,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agent(&self, color: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.color == color)
    }

    pub fn agent_mut(&mut self, color: &str) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.color == color)
    }

    pub fn contains(&self, color: &str) -> bool {
        self.agent(color).is_some()
    }

    pub fn action_slot(&self, color: &str) -> Option<usize> {
        self.agents
            .iter()
            .position(|a| a.color == color)
            .map(|i| self.action_slots[i])
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn set_points(&mut self, points: u32) {
        self.points = points;
    }

    pub fn add_point(&mut self) {
        self.points += 1;
    }

    /// Give every agent the action at its slot, or idle if the list is short
    pub fn set_actions(&mut self, actions: &[Action]) {
        for (agent, slot) in self.agents.iter_mut().zip(&self.action_slots) {
            let action = actions.get(*slot).unwrap_or(&Action::IDLE);
            agent.set_action(action);
        }
    }

    pub fn update(&mut self, field: &FieldModel) {
        for agent in &mut self.agents {
            agent.update(field);
        }
    }

    pub fn reset_position(&mut self) {
        for agent in &mut self.agents {
            agent.reset_position();
        }
    }

    pub fn reset_position_after_halftime(&mut self) {
        for agent in &mut self.agents {
            agent.reset_position_after_halftime();
        }
    }

    /// Resolve body pushes for every agent, then shots for every agent
    ///
    /// Returns the color of the last agent that touched the ball. A shot
    /// always outranks a push from the same tick.
    pub fn manage_interaction_with_ball(&self, ball: &mut Ball) -> Option<String> {
        let mut last_touched = None;

        for agent in &self.agents {
            if agent.manage_collision_with_ball(ball) {
                last_touched = Some(agent.color.clone());
            }
        }
        for agent in &self.agents {
            if agent.manage_shot_rotated(ball) {
                last_touched = Some(agent.color.clone());
            }
        }
        last_touched
    }

    /// Rebuild every agent's observation from the current positions
    pub fn update_state(&mut self, ball: &Ball, opponents: &[Agent]) {
        let raws: Vec<Vec<f64>> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, agent)| {
                let allies = self
                    .agents
                    .iter()
                    .enumerate()
                    .filter(move |(j, _)| *j != i)
                    .map(|(_, a)| a);
                agent.state.vision.observe(agent, ball, allies, opponents)
            })
            .collect();

        for (agent, raw) in self.agents.iter_mut().zip(raws) {
            agent.state.set_raw(raw);
        }
    }

    /// Scaled observations in roster order
    pub fn observations(&self) -> Vec<(String, Vec<f64>)> {
        self.agents
            .iter()
            .map(|a| (a.color.clone(), a.observation()))
            .collect()
    }
}
