//! Demo player
//!
//! Reads the game state each tick and answers with input the way a cautious
//! player would: dodge the nearest live bomb, buy protection when one gets
//! close, otherwise line up under an enemy and shoot upward.

use glam::Vec2;

use super::input::InputSource;
use crate::sim::{Facing, GameState, TickInput};

/// State-driven input source for demo runs
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Live bombs closer than this trigger a dodge
    pub danger_radius: f32,
    /// Fire on ticks that are multiples of this
    pub fire_every: u64,
    /// Fraction of the play height the avatar drifts back to
    pub home_band: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            danger_radius: 180.0,
            fire_every: 5,
            home_band: 0.75,
        }
    }
}

impl Autopilot {
    /// Decide this tick's input. Pure function of the state.
    pub fn decide(&self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        let avatar = state.avatar.rect.center();
        let tuning = &state.tuning;

        // Most dangerous bomb: the closest live one
        let threat = state
            .bombs
            .iter()
            .filter(|b| b.is_active())
            .map(|b| b.rect.center())
            .filter(|at| at.distance(avatar) < self.danger_radius)
            .min_by(|a, b| {
                a.distance(avatar)
                    .partial_cmp(&b.distance(avatar))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some(bomb) = threat {
            let score = state.score.value();
            if state.shield.is_none() && score >= tuning.shield_cost {
                input.shield = true;
            } else if score >= tuning.emp_cost {
                input.emp = true;
            }
            let away = if avatar.x >= bomb.x { 1 } else { -1 };
            press(&mut input, away, 0);
            return input;
        }

        let live_enemies = state.enemies.iter().filter(|e| !e.disabled).count();
        if live_enemies >= 3 && state.score.value() >= tuning.gravity_cost {
            input.gravity = true;
        }

        // Line up with the enemy nearest in x
        let target = state
            .enemies
            .iter()
            .map(|e| e.rect.center())
            .min_by(|a, b| {
                (a.x - avatar.x)
                    .abs()
                    .partial_cmp(&(b.x - avatar.x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        let Some(target) = target else {
            return input;
        };

        let home_y = tuning.area.height * self.home_band;
        let gap = target.x - avatar.x;
        if gap.abs() > state.avatar.speed {
            let dy = if avatar.y < home_y - state.avatar.speed { 1 } else { 0 };
            press(&mut input, gap.signum() as i32, dy);
        } else if state.avatar.facing != Facing::North {
            press(&mut input, 0, -1);
        }

        if is_above(target, avatar) && state.time_ticks.is_multiple_of(self.fire_every) {
            input.fire = true;
            input.fan_modifier = state.enemies.len() >= 3;
        }
        input
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> Option<TickInput> {
        Some(self.decide(state))
    }
}

fn is_above(target: Vec2, avatar: Vec2) -> bool {
    target.y < avatar.y
}

fn press(input: &mut TickInput, dx: i32, dy: i32) {
    input.left = dx < 0;
    input.right = dx > 0;
    input.up = dy < 0;
    input.down = dy > 0;
}
