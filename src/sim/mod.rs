//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod abilities;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use abilities::{Ability, fan_offsets, try_activate};
pub use collision::{CollisionReport, resolve};
pub use geometry::{PlayArea, Rect, direction};
pub use state::{
    Avatar, Beam, Bomb, BombState, Enemy, EnemyPhase, Explosion, Facing, GameState,
    GravityField, Mood, Score, Shield, Sprite,
};
pub use tick::{TickInput, TickOutcome, tick};
