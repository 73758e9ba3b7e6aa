//! Weapons and score-funded special abilities
//!
//! EMP and Shield act once, at the moment they are bought. Gravity only
//! spawns its field here; the field's destructive sweep runs every tick from
//! [`gravity_sweep`] during the update phase.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Special abilities purchasable with score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    Emp,
    Gravity,
    Shield,
}

impl Ability {
    pub fn cost(self, state: &GameState) -> u64 {
        match self {
            Ability::Emp => state.tuning.emp_cost,
            Ability::Gravity => state.tuning.gravity_cost,
            Ability::Shield => state.tuning.shield_cost,
        }
    }
}

/// Buy and apply `ability` if the score covers its cost.
///
/// Insufficient score (or an existing shield) is a silent no-op: nothing is
/// spent and nothing spawns. Returns whether the ability took effect.
pub fn try_activate(state: &mut GameState, ability: Ability) -> bool {
    let cost = ability.cost(state);
    if state.score.value() < cost {
        return false;
    }
    if ability == Ability::Shield && state.shield.is_some() {
        return false;
    }

    let spent = state.score.try_spend(cost);
    debug_assert!(spent);

    match ability {
        Ability::Emp => apply_emp(state),
        Ability::Gravity => {
            state.spawn_gravity_field();
        }
        Ability::Shield => {
            state.spawn_shield();
        }
    }
    log::info!(
        "{:?} activated (-{}), score now {}",
        ability,
        cost,
        state.score.value()
    );
    true
}

/// Disable every live enemy and bomb. Bombs lose half their speed, once.
fn apply_emp(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.disable();
    }
    for bomb in &mut state.bombs {
        bomb.disable();
    }
    state.emp_flash = true;
}

/// One gravity-field pulse: every live enemy and bomb becomes an explosion
/// and pays out its reward. Runs once per live field per tick.
pub fn gravity_sweep(state: &mut GameState) {
    let bombs = std::mem::take(&mut state.bombs);
    let enemies = std::mem::take(&mut state.enemies);

    for bomb in &bombs {
        state.spawn_explosion(bomb.rect.center(), state.tuning.bomb_explosion_life);
        state.score.credit(state.tuning.bomb_reward);
    }
    for enemy in &enemies {
        state.spawn_explosion(enemy.rect.center(), state.tuning.enemy_explosion_life);
        state.score.credit(state.tuning.enemy_reward);
    }

    if !bombs.is_empty() || !enemies.is_empty() {
        log::debug!(
            "gravity swept {} enemies, {} bombs",
            enemies.len(),
            bombs.len()
        );
    }
}

/// Angular offsets (degrees) for an `n`-shot fan spread evenly across `arc`.
///
/// Offsets run from `-arc/2` to `+arc/2` inclusive. A fan needs at least two
/// shots; smaller requests degenerate to a single straight shot.
pub fn fan_offsets(n: usize, arc: f32) -> Vec<f32> {
    if n < 2 {
        return vec![0.0];
    }
    let step = arc / (n - 1) as f32;
    (0..n).map(|k| -arc / 2.0 + k as f32 * step).collect()
}

/// Handle one fire trigger: a single beam, or the full fan when the fan
/// modifier is held. Returns the number of beams spawned.
pub fn fire(state: &mut GameState, fan: bool) -> usize {
    if !fan {
        state.spawn_beam(0.0);
        return 1;
    }
    let offsets = fan_offsets(state.tuning.fan_count, state.tuning.fan_arc);
    for &offset in &offsets {
        state.spawn_beam(offset);
    }
    offsets.len()
}
