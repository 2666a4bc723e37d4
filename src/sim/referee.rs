//! Rules authority
//!
//! The referee owns no entities. Teams, ball and field are handed in per
//! call; the only state carried between ticks is who touched the ball last.

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::ball::Ball;
use super::collision::circle_circle_collision;
use super::events::{EventLog, MatchEvent};
use super::field::FieldModel;
use super::team::Team;
use crate::Point;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Referee {
    /// Veto moves that would overlap another agent
    pub collision_enable: bool,
    /// Report detected collisions to the caller
    pub penalty_collision_enable: bool,
    last_touched: Option<String>,
}

impl Referee {
    pub fn new(collision_enable: bool, penalty_collision_enable: bool) -> Self {
        Self {
            collision_enable,
            penalty_collision_enable,
            last_touched: None,
        }
    }

    /// Color of the agent that touched the ball last, if any
    pub fn last_touched(&self) -> Option<&str> {
        self.last_touched.as_deref()
    }

    pub fn clear_last_touched(&mut self) {
        self.last_touched = None;
    }

    /// Record this tick's toucher. A tick without a touch keeps the previous one.
    pub fn update(&mut self, last_touched: Option<String>) {
        if last_touched.is_some() {
            self.last_touched = last_touched;
        }
    }

    fn report(&self, detected: bool) -> Option<bool> {
        self.penalty_collision_enable.then_some(detected)
    }

    /// Veto moves that would run one teammate into another
    ///
    /// Every ordered pair is checked: the first agent's next position against
    /// the second agent's current body. Returns the detection result only when
    /// penalty reporting is on.
    pub fn collision_between_agents(&self, team: &mut Team, events: &mut EventLog) -> Option<bool> {
        let mut detected = false;
        if self.collision_enable {
            let agents = team.agents_mut();
            for i in 0..agents.len() {
                for j in 0..agents.len() {
                    if i == j {
                        continue;
                    }
                    let next = agents[i].next_position();
                    if overlaps(next, &agents[i], &agents[j]) {
                        agents[i].cancel_movement();
                        events.emit(MatchEvent::AgentCollision {
                            agent: agents[i].color.clone(),
                            other: agents[j].color.clone(),
                        });
                        detected = true;
                    }
                }
            }
        }
        self.report(detected)
    }

    /// Veto moves that would run a left agent into a right agent or back
    pub fn collision_between_teams(
        &self,
        left: &mut Team,
        right: &mut Team,
        events: &mut EventLog,
    ) -> Option<bool> {
        let mut detected = false;
        if self.collision_enable {
            for l in left.agents_mut() {
                for r in right.agents_mut().iter_mut() {
                    let next_left = l.next_position();
                    let next_right = r.next_position();

                    if overlaps(next_left, l, r) {
                        l.cancel_movement();
                        events.emit(MatchEvent::AgentCollision {
                            agent: l.color.clone(),
                            other: r.color.clone(),
                        });
                        detected = true;
                    }
                    if overlaps(next_right, r, l) {
                        r.cancel_movement();
                        events.emit(MatchEvent::AgentCollision {
                            agent: r.color.clone(),
                            other: l.color.clone(),
                        });
                        detected = true;
                    }
                }
            }
        }
        self.report(detected)
    }

    pub fn is_agent_outside_sideline(agent: &Agent, field: &FieldModel) -> bool {
        outside_sideline(agent.pos, field)
    }

    pub fn is_agent_outside_goal_line(agent: &Agent, field: &FieldModel) -> bool {
        outside_goal_line(agent.pos, field)
    }

    /// Report agents standing outside the play area. Nothing is enforced.
    pub fn is_agent_outside_field(
        &self,
        left: &Team,
        right: &Team,
        field: &FieldModel,
        events: &mut EventLog,
    ) {
        for agent in right.agents().iter().chain(left.agents()) {
            if Self::is_agent_outside_sideline(agent, field) {
                events.emit(MatchEvent::AgentOutsideSideline {
                    agent: agent.color.clone(),
                });
            }
            if Self::is_agent_outside_goal_line(agent, field) {
                events.emit(MatchEvent::AgentOutsideGoalLine {
                    agent: agent.color.clone(),
                });
            }
        }
    }

    /// Last toucher if the ball is beyond a sideline, otherwise `None`
    ///
    /// A ball that went out untouched also yields `None`.
    pub fn is_ball_outside_sideline(&self, ball: &Ball, field: &FieldModel) -> Option<&str> {
        if outside_sideline(ball.pos, field) {
            return self.last_touched();
        }
        None
    }

    /// Last toucher if the ball is beyond a goal line, otherwise `None`
    pub fn is_ball_outside_goal_line(&self, ball: &Ball, field: &FieldModel) -> Option<&str> {
        if outside_goal_line(ball.pos, field) {
            return self.last_touched();
        }
        None
    }

    /// +1 when the ball is inside the left goal, -1 inside the right goal, else 0
    pub fn is_goal(ball: &Ball, field: &FieldModel) -> i32 {
        let g = &field.goals;
        let left_mouth = g.left_x + g.width;
        let between_posts = g.y > ball.pos.y && ball.pos.y > g.y - g.height;

        if ball.pos.x <= left_mouth && between_posts {
            return 1;
        }
        if ball.pos.x >= g.right_x && between_posts {
            return -1;
        }
        0
    }
}

#[inline]
fn overlaps(next: Point, mover: &Agent, other: &Agent) -> bool {
    circle_circle_collision(next, mover.radius, other.pos, other.radius)
}

/// Bounds of the play area: (left x, right x, bottom y, top y)
fn play_bounds(field: &FieldModel) -> (f64, f64, f64, f64) {
    let s = &field.side_line;
    (s.x, s.x + s.width, s.y - s.height, s.y)
}

fn outside_sideline(p: Point, field: &FieldModel) -> bool {
    let (x0, x1, bottom, top) = play_bounds(field);
    x0 < p.x && p.x < x1 && (p.y < bottom || p.y > top)
}

fn outside_goal_line(p: Point, field: &FieldModel) -> bool {
    let (x0, x1, bottom, top) = play_bounds(field);
    (p.x < x0 || p.x > x1) && bottom <= p.y && p.y <= top
}
