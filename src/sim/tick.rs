//! Fixed timestep match tick
//!
//! Core loop that advances a match deterministically. The phase order is
//! fixed; each phase reads what the previous one wrote.

use serde::{Deserialize, Serialize};

use super::Side;
use super::action::Action;
use super::events::MatchEvent;
use super::referee::Referee;
use super::state::Game;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// One action per slot; slot 0 is the trained agent. Missing slots idle.
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Goal result after the halftime flip: +1 right team scored, -1 left team scored
    pub result: i32,
    /// `result` seen from the trained agent's side
    pub reward: i32,
    /// Team that scored this tick
    pub scorer: Option<Side>,
    /// Ball went out of play without a goal
    pub dead_ball: bool,
    /// Collision detection result, present only when penalty reporting is on
    pub penalty_collision: Option<bool>,
}

/// Apply the tick's actions to both teams and advance the match by one step
pub fn tick(game: &mut Game, input: &TickInput) -> TickOutcome {
    game.team_left.set_actions(&input.actions);
    game.team_right.set_actions(&input.actions);
    game.step()
}

impl Game {
    /// Advance one timestep with the actions already set on the agents
    pub fn step(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        // Collision vetoes
        let reports = [
            self.referee
                .collision_between_agents(&mut self.team_left, &mut self.events),
            self.referee
                .collision_between_agents(&mut self.team_right, &mut self.events),
            self.referee.collision_between_teams(
                &mut self.team_left,
                &mut self.team_right,
                &mut self.events,
            ),
        ];
        outcome.penalty_collision = reports.into_iter().flatten().reduce(|a, b| a || b);

        // Movement
        self.team_left.update(&self.field);
        self.team_right.update(&self.field);

        // Ball interaction, right side evaluated last and wins ties
        let touched_left = self.team_left.manage_interaction_with_ball(&mut self.ball);
        let touched_right = self.team_right.manage_interaction_with_ball(&mut self.ball);
        let last_touched = touched_right.or(touched_left);

        self.ball.update(&self.field);

        self.referee.update(last_touched);
        self.referee.is_agent_outside_field(
            &self.team_left,
            &self.team_right,
            &self.field,
            &mut self.events,
        );

        // Dead balls
        let over_goal_line = self
            .referee
            .is_ball_outside_goal_line(&self.ball, &self.field)
            .map(str::to_string);
        if over_goal_line.is_some() && Referee::is_goal(&self.ball, &self.field) == 0 {
            self.events.emit(MatchEvent::BallOutsideGoalLine {
                last_touched: over_goal_line,
            });
            self.new_match();
            outcome.dead_ball = true;
        }
        let over_sideline = self
            .referee
            .is_ball_outside_sideline(&self.ball, &self.field)
            .map(str::to_string);
        if over_sideline.is_some() {
            self.events.emit(MatchEvent::BallOutsideSideline {
                last_touched: over_sideline,
            });
            self.new_match();
            outcome.dead_ball = true;
        }

        // Goals
        let result = Referee::is_goal(&self.ball, &self.field) * self.halftime;
        if result != 0 {
            self.new_match();
            let scorer = if result > 0 {
                self.team_right.add_point();
                Side::Right
            } else {
                self.team_left.add_point();
                Side::Left
            };
            self.events.emit(MatchEvent::Goal {
                scorer,
                team_left_points: self.team_left.points(),
                team_right_points: self.team_right.points(),
            });
            outcome.scorer = Some(scorer);
        }

        self.refresh_observations();

        outcome.result = result;
        outcome.reward = self.from_trained_perspective(result);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GameBuilder;
    use crate::consts::TIMESTEP;
    use crate::policy::RandomPolicy;
    use crate::settings::ConfigFlag;
    use glam::DVec2;

    fn game() -> Game {
        GameBuilder::kid_size().build().expect("reference roster builds")
    }

    fn idle() -> TickInput {
        TickInput::new(vec![Action::IDLE; 4])
    }

    fn goal_mouth_y(game: &Game) -> f64 {
        let g = &game.field.goals;
        g.y - g.height / 2.0
    }

    #[test]
    fn test_ball_in_left_goal_scores_for_right_team() {
        let mut game = game();
        let y = goal_mouth_y(&game);
        game.ball.pos = DVec2::new(game.field.goals.left_x + game.field.goals.width / 2.0, y);

        let outcome = tick(&mut game, &idle());
        assert_eq!(game.team_right.points(), 1);
        assert_eq!(game.team_left.points(), 0);
        assert_eq!(game.ball.pos, game.ball.init_pos);
        assert_eq!(outcome.result, 1);
        assert_eq!(outcome.scorer, Some(Side::Right));
        // The trained agent plays on the left and conceded
        assert_eq!(outcome.reward, -1);
    }

    #[test]
    fn test_ball_at_right_goal_mouth_scores_for_left_team() {
        let mut game = game();
        let y = goal_mouth_y(&game);
        game.ball.pos = DVec2::new(game.field.goals.right_x, y);

        let outcome = tick(&mut game, &idle());
        assert_eq!(game.team_left.points(), 1);
        assert_eq!(game.team_right.points(), 0);
        assert_eq!(game.ball.pos, game.ball.init_pos);
        assert_eq!(outcome.reward, 1);
    }

    #[test]
    fn test_halftime_flips_scoring_sign() {
        let mut game = game();
        game.midgame_event();
        let y = goal_mouth_y(&game);
        game.ball.pos = DVec2::new(game.field.goals.left_x + game.field.goals.width / 2.0, y);

        let outcome = tick(&mut game, &idle());
        assert_eq!(outcome.result, -1);
        assert_eq!(game.team_left.points(), 1);
    }

    #[test]
    fn test_untouched_ball_out_of_play_is_not_dead() {
        let mut game = game();
        game.ball.pos = DVec2::new(0.0, 2.0);
        let outcome = tick(&mut game, &idle());
        assert!(!outcome.dead_ball);
        assert_ne!(game.ball.pos, game.ball.init_pos);
    }

    #[test]
    fn test_ball_out_over_sideline_resets_play() {
        let mut game = game();
        game.referee.update(Some("green".into()));
        game.ball.pos = DVec2::new(0.0, 2.0);

        let outcome = tick(&mut game, &idle());
        assert!(outcome.dead_ball);
        assert_eq!(outcome.result, 0);
        assert_eq!(game.ball.pos, game.ball.init_pos);
        assert_eq!(game.referee.last_touched(), None);
        assert!(game.events().contains(&MatchEvent::BallOutsideSideline {
            last_touched: Some("green".into())
        }));
    }

    #[test]
    fn test_ball_out_over_goal_line_beside_goal_resets_play() {
        let mut game = game();
        game.referee.update(Some("white".into()));
        // Behind the left goal line, above the goal
        game.ball.pos = DVec2::new(-19.0, 25.0);

        let outcome = tick(&mut game, &idle());
        assert!(outcome.dead_ball);
        assert_eq!(game.team_left.points() + game.team_right.points(), 0);
        assert_eq!(game.ball.pos, game.ball.init_pos);
    }

    #[test]
    fn test_right_side_toucher_wins_a_shared_touch() {
        let mut game = game();
        // Purple (left) and yellow (right) both overlap the ball
        game.agent_mut("purple").unwrap().pos = DVec2::new(-0.9, 16.0);
        game.agent_mut("yellow").unwrap().pos = DVec2::new(0.9, 16.0);
        game.ball.pos = DVec2::new(0.0, 16.0);

        let outcome = tick(&mut game, &idle());
        assert!(!outcome.dead_ball);
        assert_eq!(game.referee.last_touched(), Some("yellow"));
    }

    #[test]
    fn test_observation_length_by_configuration() {
        let full = game();
        assert_eq!(full.trained_observation().len(), 20);

        let mut blind = GameBuilder::kid_size()
            .flags(&[ConfigFlag::AlliesVisionDisable, ConfigFlag::OpponentsVisionDisable])
            .build()
            .unwrap();
        assert_eq!(blind.trained_observation().len(), 8);
        tick(&mut blind, &idle());
        assert_eq!(blind.trained_observation().len(), 8);
    }

    #[test]
    fn test_forward_tick_moves_trained_agent() {
        let mut game = game();
        let start = game.agent("purple").unwrap().pos;
        let mut actions = vec![Action::IDLE; 4];
        actions[0] = Action::from([0, 0, 1, 0, 0, 0, 0]);
        tick(&mut game, &TickInput::new(actions));

        let moved = game.agent("purple").unwrap().pos;
        let step = start.distance(moved);
        assert!((step - crate::consts::PLAYER_SPEED_FORWARD * TIMESTEP).abs() < 1e-12);
    }

    #[test]
    fn test_penalty_collision_surfaces_only_when_enabled() {
        let mut plain = game();
        assert_eq!(tick(&mut plain, &idle()).penalty_collision, None);

        let mut reporting = GameBuilder::kid_size()
            .flags(&[ConfigFlag::PenaltyCollisionEnable])
            .build()
            .unwrap();
        assert_eq!(tick(&mut reporting, &idle()).penalty_collision, Some(false));
    }

    #[test]
    fn test_same_actions_replay_identically() {
        let run = |seed: u64| {
            let mut game = game();
            let mut policies: Vec<RandomPolicy> =
                (0..4).map(|i| RandomPolicy::new(seed + i)).collect();
            let mut rewards = Vec::new();
            for _ in 0..300 {
                let actions = policies.iter_mut().map(RandomPolicy::act).collect();
                rewards.push(tick(&mut game, &TickInput::new(actions)).reward);
            }
            (game.trained_observation(), game.ball.clone(), rewards)
        };
        assert_eq!(run(7), run(7));
    }
}
