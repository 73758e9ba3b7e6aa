//! Collision detection and resolution between entity categories
//!
//! Pairings are checked in a fixed priority order. Matching happens on
//! snapshots of the bounding rects with per-entity "consumed" flags, so an
//! entity consumed by an earlier pairing can't match again this tick. All
//! removals and spawns are applied after every pairing has been matched.

use super::geometry::Rect;
use super::state::{BombState, GameState, Mood};

/// What happened during one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Enemy × Beam matches
    pub enemies_shot: usize,
    /// Bomb × Beam matches
    pub bombs_shot: usize,
    /// Bombs that touched the avatar (live or defused)
    pub bombs_hit_avatar: usize,
    /// Shield × Bomb match (at most one per tick)
    pub shield_absorbed: bool,
    /// A live bomb reached the avatar
    pub defeat: bool,
}

/// Greedy matching in collection order: each unconsumed `a` that overlaps
/// any unconsumed `b` is hit once, and consumes every unconsumed `b` it
/// overlaps. A consumed `b` can't hit anything else this tick.
fn match_pairs(
    a: &[Rect],
    a_used: &mut [bool],
    b: &[Rect],
    b_used: &mut [bool],
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, ra) in a.iter().enumerate() {
        if a_used[i] {
            continue;
        }
        let mut first = None;
        for (j, rb) in b.iter().enumerate() {
            if b_used[j] || !ra.overlaps(rb) {
                continue;
            }
            b_used[j] = true;
            first.get_or_insert(j);
        }
        if let Some(j) = first {
            a_used[i] = true;
            pairs.push((i, j));
        }
    }
    pairs
}

/// Drop every element whose flag is set
fn remove_flagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !flags[idx];
        idx += 1;
        keep
    });
}

/// Resolve all pairings for this tick in priority order:
/// 1. Enemy × Beam (+enemy reward, avatar cheers)
/// 2. Bomb × Beam (+bomb reward)
/// 3. Bomb × Avatar (live bomb: defeat; defused bomb: just removed)
/// 4. Shield × Bomb (shield explodes, bomb absorbed, no reward)
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    let enemy_rects: Vec<Rect> = state.enemies.iter().map(|e| e.rect).collect();
    let bomb_rects: Vec<Rect> = state.bombs.iter().map(|b| b.rect).collect();
    let beam_rects: Vec<Rect> = state.beams.iter().map(|b| b.rect).collect();

    let mut enemy_used = vec![false; enemy_rects.len()];
    let mut bomb_used = vec![false; bomb_rects.len()];
    let mut beam_used = vec![false; beam_rects.len()];

    let enemy_hits = match_pairs(&enemy_rects, &mut enemy_used, &beam_rects, &mut beam_used);
    let bomb_hits = match_pairs(&bomb_rects, &mut bomb_used, &beam_rects, &mut beam_used);

    let avatar = state.avatar.rect;
    for (i, rect) in bomb_rects.iter().enumerate() {
        if bomb_used[i] || !rect.overlaps(&avatar) {
            continue;
        }
        bomb_used[i] = true;
        report.bombs_hit_avatar += 1;
        if state.bombs[i].state == BombState::Active {
            report.defeat = true;
        }
    }

    let mut absorbed_by_shield = None;
    if let (false, Some(shield)) = (report.defeat, &state.shield) {
        absorbed_by_shield = bomb_rects
            .iter()
            .enumerate()
            .find(|(i, rect)| !bomb_used[*i] && rect.overlaps(&shield.rect))
            .map(|(i, _)| i);
        if let Some(i) = absorbed_by_shield {
            bomb_used[i] = true;
        }
    }

    // --- Apply effects ---
    for &(i, _) in &enemy_hits {
        let center = enemy_rects[i].center();
        state.spawn_explosion(center, state.tuning.enemy_explosion_life);
        state.score.credit(state.tuning.enemy_reward);
        log::debug!("enemy {} shot down", state.enemies[i].id);
    }
    if !enemy_hits.is_empty() {
        state.avatar.mood = Mood::Cheer;
    }
    for &(i, _) in &bomb_hits {
        state.spawn_explosion(bomb_rects[i].center(), state.tuning.bomb_explosion_life);
        state.score.credit(state.tuning.bomb_reward);
    }
    if let Some(shield) = absorbed_by_shield.and_then(|_| state.shield.take()) {
        state.spawn_explosion(shield.rect.center(), state.tuning.shield_explosion_life);
        report.shield_absorbed = true;
        log::debug!("shield {} absorbed a bomb", shield.id);
    }
    if report.defeat {
        state.avatar.mood = Mood::Defeated;
    }

    report.enemies_shot = enemy_hits.len();
    report.bombs_shot = bomb_hits.len();

    remove_flagged(&mut state.enemies, &enemy_used);
    remove_flagged(&mut state.bombs, &bomb_used);
    remove_flagged(&mut state.beams, &beam_used);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bomb, Enemy, EnemyPhase, Score};
    use glam::Vec2;

    fn place_enemy(state: &mut GameState, center: Vec2) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            rect: Rect::from_center(center, Vec2::new(80.0, 60.0)),
            vy: 0.0,
            hover_altitude: 100.0,
            fire_interval: 100,
            phase: EnemyPhase::Hovering,
            disabled: false,
            variant: 0,
        });
    }

    fn place_bomb(state: &mut GameState, center: Vec2, live: bool) {
        let id = state.next_entity_id();
        state.bombs.push(Bomb {
            id,
            rect: Rect::from_center(center, Vec2::splat(20.0)),
            vel: Vec2::Y,
            speed: 6.0,
            radius: 10,
            color: 0,
            state: if live { BombState::Active } else { BombState::Disabled },
        });
    }

    fn place_beam(state: &mut GameState, center: Vec2) {
        let id = state.next_entity_id();
        state.beams.push(crate::sim::state::Beam {
            id,
            rect: Rect::from_center(center, Vec2::new(60.0, 20.0)),
            vel: Vec2::X,
            speed: 10.0,
            angle: 0.0,
        });
    }

    #[test]
    fn test_enemy_and_bomb_hits_score_once_each() {
        let mut state = GameState::new(1);
        place_enemy(&mut state, Vec2::new(100.0, 100.0));
        place_beam(&mut state, Vec2::new(100.0, 100.0));
        place_bomb(&mut state, Vec2::new(400.0, 300.0), true);
        place_beam(&mut state, Vec2::new(400.0, 300.0));

        let report = resolve(&mut state);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(report.bombs_shot, 1);
        assert_eq!(state.score.value(), 11);
        assert!(state.enemies.is_empty());
        assert!(state.bombs.is_empty());
        assert!(state.beams.is_empty());
        assert_eq!(state.explosions.len(), 2);
        assert_eq!(state.avatar.mood, Mood::Cheer);
    }

    #[test]
    fn test_beam_consumed_by_enemy_cannot_hit_bomb() {
        let mut state = GameState::new(1);
        // Enemy and bomb both overlap the only beam
        place_enemy(&mut state, Vec2::new(100.0, 100.0));
        place_bomb(&mut state, Vec2::new(110.0, 105.0), true);
        place_beam(&mut state, Vec2::new(105.0, 100.0));

        let report = resolve(&mut state);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(report.bombs_shot, 0);
        assert_eq!(state.score.value(), 10);
        assert_eq!(state.bombs.len(), 1);
    }

    #[test]
    fn test_one_beam_kills_one_enemy() {
        let mut state = GameState::new(1);
        place_enemy(&mut state, Vec2::new(100.0, 100.0));
        place_enemy(&mut state, Vec2::new(130.0, 100.0));
        place_beam(&mut state, Vec2::new(115.0, 100.0));

        let report = resolve(&mut state);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score.value(), 10);
    }

    #[test]
    fn test_hit_enemy_takes_every_overlapping_beam() {
        let mut state = GameState::new(1);
        place_enemy(&mut state, Vec2::new(100.0, 100.0));
        place_beam(&mut state, Vec2::new(100.0, 100.0));
        place_beam(&mut state, Vec2::new(100.0, 100.0));
        // Off the enemy, overlapping a bomb
        place_bomb(&mut state, Vec2::new(400.0, 300.0), true);
        place_beam(&mut state, Vec2::new(400.0, 300.0));

        let report = resolve(&mut state);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(report.bombs_shot, 1);
        assert_eq!(state.score.value(), 11);
        assert!(state.beams.is_empty());
        assert_eq!(state.explosions.len(), 2);
    }

    #[test]
    fn test_hit_bomb_takes_every_overlapping_beam() {
        let mut state = GameState::new(1);
        place_bomb(&mut state, Vec2::new(400.0, 300.0), true);
        for dx in [0.0, 5.0, 10.0] {
            place_beam(&mut state, Vec2::new(400.0 + dx, 300.0));
        }

        let report = resolve(&mut state);
        assert_eq!(report.bombs_shot, 1);
        assert_eq!(state.score.value(), 1);
        assert!(state.beams.is_empty());
    }

    #[test]
    fn test_live_bomb_on_avatar_is_defeat() {
        let mut state = GameState::new(1);
        let at = state.avatar.rect.center();
        place_bomb(&mut state, at, true);

        let report = resolve(&mut state);
        assert!(report.defeat);
        assert_eq!(state.avatar.mood, Mood::Defeated);
        assert!(state.bombs.is_empty());
    }

    #[test]
    fn test_defused_bomb_on_avatar_is_harmless() {
        let mut state = GameState::new(1);
        state.score = Score::new(3);
        let at = state.avatar.rect.center();
        place_bomb(&mut state, at, false);

        let report = resolve(&mut state);
        assert!(!report.defeat);
        assert_eq!(report.bombs_hit_avatar, 1);
        assert!(state.bombs.is_empty());
        assert_eq!(state.score.value(), 3);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_shield_absorbs_one_bomb() {
        let mut state = GameState::new(1);
        state.spawn_shield();
        let at = state.shield.as_ref().unwrap().rect.center();
        place_bomb(&mut state, at, true);
        place_bomb(&mut state, at, true);

        let report = resolve(&mut state);
        assert!(report.shield_absorbed);
        assert!(state.shield.is_none());
        assert_eq!(state.bombs.len(), 1);
        assert_eq!(state.score.value(), 0);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].life, 30);
    }

    #[test]
    fn test_beam_takes_priority_over_shield() {
        let mut state = GameState::new(1);
        state.spawn_shield();
        let at = state.shield.as_ref().unwrap().rect.center();
        place_bomb(&mut state, at, true);
        place_beam(&mut state, at);

        let report = resolve(&mut state);
        assert_eq!(report.bombs_shot, 1);
        assert!(!report.shield_absorbed);
        assert!(state.shield.is_some());
        assert_eq!(state.score.value(), 1);
    }
}
