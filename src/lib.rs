//! Skyguard - a fixed-tick 2D shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, score economy)
//! - `render`: Draw-order contract with the display collaborator
//! - `platform`: Input, clock and autopilot collaborators
//! - `session`: One play session from first tick to defeat or quit
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{Outcome, run_session};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (logical units)
    pub const WIDTH: f32 = 1100.0;
    pub const HEIGHT: f32 = 650.0;

    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 50;

    /// Score rewards
    pub const ENEMY_REWARD: u64 = 10;
    pub const BOMB_REWARD: u64 = 1;
}

/// Unit vector at `degrees`, measured counter-clockwise on screen (y grows down)
#[inline]
pub fn screen_heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Screen angle of a vector in degrees (inverse of [`screen_heading`])
#[inline]
pub fn screen_angle(v: Vec2) -> f32 {
    // 0.0 - y keeps a horizontal vector at +0.0, so West maps to 180 rather than -180
    (0.0 - v.y).atan2(v.x).to_degrees()
}
