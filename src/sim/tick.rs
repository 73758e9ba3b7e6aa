//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Each tick runs
//! the same phases in the same order:
//! 1. avatar movement
//! 2. enemy spawn timer
//! 3. enemy fire timers
//! 4. triggers (fire/fan, EMP, gravity, shield)
//! 5. collision resolution (may end the session)
//! 6. entity updates, including each gravity field's sweep
//!
//! Rendering is the caller's business (see [`crate::render`]).

use serde::{Deserialize, Serialize};

use super::abilities::{self, Ability};
use super::collision::{self, CollisionReport};
use super::state::GameState;

/// Input snapshot for a single tick (deterministic)
///
/// Direction and modifier fields are "held" state; trigger fields are
/// "just pressed" edges and act once per press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Held together with fire to shoot a full fan instead of one beam
    pub fan_modifier: bool,
    pub fire: bool,
    pub emp: bool,
    pub gravity: bool,
    pub shield: bool,
}

impl TickInput {
    /// Summed movement step, each axis in -1..=1
    pub fn step(&self) -> (i32, i32) {
        let dx = self.right as i32 - self.left as i32;
        let dy = self.down as i32 - self.up as i32;
        (dx, dy)
    }
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Continue,
    /// A live bomb hit the avatar; the rest of the tick was skipped
    Defeat,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let now = state.time_ticks;
    state.emp_flash = false;

    // 1. Avatar movement
    let (dx, dy) = input.step();
    let area = state.tuning.area;
    state.avatar.steer(dx, dy, &area);

    // 2. Enemy spawn timer
    if now.is_multiple_of(state.tuning.enemy_spawn_interval) {
        state.spawn_enemy();
    }

    // 3. Hovering enemies drop bombs in lockstep on the shared tick
    let firing: Vec<_> = state
        .enemies
        .iter()
        .filter(|e| e.fires_at(now))
        .map(|e| e.rect)
        .collect();
    for from in &firing {
        state.spawn_bomb(from);
    }

    // 4. Triggers
    if input.fire {
        abilities::fire(state, input.fan_modifier);
    }
    if input.emp {
        abilities::try_activate(state, Ability::Emp);
    }
    if input.gravity {
        abilities::try_activate(state, Ability::Gravity);
    }
    if input.shield {
        abilities::try_activate(state, Ability::Shield);
    }

    // 5. Collisions
    let report = collision::resolve(state);
    log_report(now, &report);
    if report.defeat {
        log::info!("Defeat at tick {} with score {}", now, state.score.value());
        return TickOutcome::Defeat;
    }

    // 6. Updates
    update_entities(state);

    state.time_ticks += 1;
    state.normalize_order();
    TickOutcome::Continue
}

/// Advance every entity not already handled this tick, dropping the expired
/// and the out-of-bounds.
fn update_entities(state: &mut GameState) {
    let area = state.tuning.area;

    for bomb in &mut state.bombs {
        bomb.advance();
    }
    state.bombs.retain(|b| area.contains(&b.rect));

    for beam in &mut state.beams {
        beam.advance();
    }
    state.beams.retain(|b| area.contains(&b.rect));

    for enemy in &mut state.enemies {
        enemy.update();
    }

    state.explosions.retain_mut(|e| e.decay());

    let shield_expired = state.shield.as_mut().is_some_and(|s| !s.decay());
    if shield_expired {
        state.shield = None;
    }

    // Each live field sweeps, then ages
    for _ in 0..state.gravity_fields.len() {
        abilities::gravity_sweep(state);
    }
    state.gravity_fields.retain_mut(|g| g.decay());
}

fn log_report(now: u64, report: &CollisionReport) {
    if report.enemies_shot + report.bombs_shot + report.bombs_hit_avatar > 0
        || report.shield_absorbed
    {
        log::trace!("tick {now}: {report:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Bomb, BombState, EnemyPhase, Facing, Score};
    use glam::Vec2;

    /// A state past the first enemy spawn, with nothing on screen
    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.time_ticks = 1;
        state
    }

    #[test]
    fn test_first_tick_spawns_enemy() {
        let mut state = GameState::new(12345);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Continue);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.time_ticks, 1);
        // Keep the avatar alive while the spawn timer runs
        state.enemies[0].disable();

        for _ in 1..200 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies.len(), 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_movement_updates_facing() {
        let mut state = quiet_state(1);
        let start = state.avatar.rect.center();
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.avatar.facing, Facing::NorthWest);
        assert_eq!(state.avatar.rect.center(), start + Vec2::new(-10.0, -10.0));

        // Opposing keys cancel out and leave facing alone
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.avatar.facing, Facing::NorthWest);
    }

    #[test]
    fn test_fire_and_fan_are_exclusive() {
        let mut state = quiet_state(1);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.beams.len(), 1);

        let mut state = quiet_state(1);
        let fan = TickInput {
            fire: true,
            fan_modifier: true,
            ..Default::default()
        };
        tick(&mut state, &fan);
        // The whole fan, and no extra straight beam
        assert_eq!(state.beams.len(), 10);
    }

    #[test]
    fn test_beams_leave_the_area() {
        let mut state = quiet_state(1);
        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
        );
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.beams.is_empty());
    }

    #[test]
    fn test_hovering_enemies_fire_in_lockstep() {
        let mut state = quiet_state(9);
        state.time_ticks = 300;
        for x in [200.0, 500.0] {
            state.spawn_enemy();
            let enemy = state.enemies.last_mut().unwrap();
            enemy.rect.set_center(Vec2::new(x, 120.0));
            enemy.phase = EnemyPhase::Hovering;
            enemy.vy = 0.0;
            enemy.fire_interval = 100;
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bombs.len(), 2);

        // Next drop is 100 ticks later, for both at once
        for t in 301..=400 {
            state.bombs.clear();
            tick(&mut state, &TickInput::default());
            let expected = if t == 400 { 2 } else { 0 };
            assert_eq!(state.bombs.len(), expected, "tick {t}");
        }
    }

    #[test]
    fn test_live_bomb_ends_tick_early() {
        let mut state = quiet_state(1);
        let id = state.next_entity_id();
        let at = state.avatar.rect.center();
        state.bombs.push(Bomb {
            id,
            rect: Rect::from_center(at, Vec2::splat(20.0)),
            vel: Vec2::Y,
            speed: 6.0,
            radius: 10,
            color: 0,
            state: BombState::Active,
        });
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Defeat);
        // Updates were skipped, so the clock did not advance
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_gravity_first_tick_payout() {
        let mut state = quiet_state(3);
        state.score = Score::new(250);
        for x in [150.0, 450.0, 750.0] {
            state.spawn_enemy();
            state.enemies.last_mut().unwrap().rect.set_center(Vec2::new(x, 60.0));
        }
        let from = Rect::from_center(Vec2::new(300.0, 100.0), Vec2::new(80.0, 60.0));
        state.spawn_bomb(&from);
        state.spawn_bomb(&from);

        let input = TickInput {
            gravity: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.score.value(), 250 - 200 + 3 * 10 + 2);
        assert!(state.enemies.is_empty());
        assert!(state.bombs.is_empty());
        assert_eq!(state.gravity_fields.len(), 1);
        assert_eq!(state.gravity_fields[0].life, 399);
    }

    #[test]
    fn test_gravity_field_expires() {
        let mut state = quiet_state(3);
        state.score = Score::new(200);
        tick(
            &mut state,
            &TickInput {
                gravity: true,
                ..Default::default()
            },
        );
        for _ in 0..398 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.gravity_fields.len(), 1);
        tick(&mut state, &TickInput::default());
        assert!(state.gravity_fields.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                fan_modifier: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..150 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.bombs.len(), state2.bombs.len());
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.avatar.rect, state2.avatar.rect);
    }
}
