//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults reproduce the stock
//! balance; a JSON file may override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::geometry::PlayArea;

/// Errors that can occur while loading a tuning file.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Inclusive integer range used for randomized spawn parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: u32,
    pub max: u32,
}

impl Span {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub area: PlayArea,
    pub ticks_per_second: u32,

    // === Avatar ===
    pub avatar_start: Vec2,
    pub avatar_size: Vec2,
    pub avatar_speed: f32,

    // === Enemies ===
    /// Ticks between enemy spawns
    pub enemy_spawn_interval: u64,
    pub enemy_size: Vec2,
    pub enemy_descent_speed: f32,
    /// Range for the y-coordinate where descent stops
    pub hover_altitude: Span,
    /// Range for ticks between bomb drops while hovering
    pub fire_interval: Span,
    pub enemy_variants: u8,

    // === Bombs ===
    pub bomb_speed: f32,
    pub bomb_radius: Span,
    pub bomb_colors: u8,

    // === Beams ===
    pub beam_speed: f32,
    pub beam_size: Vec2,
    /// Shots per fan trigger
    pub fan_count: usize,
    /// Total angular spread of a fan (degrees)
    pub fan_arc: f32,

    // === Explosions ===
    pub explosion_size: Vec2,
    pub enemy_explosion_life: i32,
    pub bomb_explosion_life: i32,
    pub shield_explosion_life: i32,

    // === Abilities ===
    pub emp_cost: u64,
    pub gravity_cost: u64,
    pub gravity_life: i32,
    pub shield_cost: u64,
    pub shield_life: i32,
    pub shield_thickness: f32,

    // === Score ===
    pub enemy_reward: u64,
    pub bomb_reward: u64,
    pub score_position: Vec2,

    /// Milliseconds the final frame stays up after a defeat
    pub defeat_pause_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            area: PlayArea::new(WIDTH, HEIGHT),
            ticks_per_second: TICKS_PER_SECOND,

            avatar_start: Vec2::new(900.0, 400.0),
            avatar_size: Vec2::new(72.0, 68.0),
            avatar_speed: 10.0,

            enemy_spawn_interval: 200,
            enemy_size: Vec2::new(80.0, 62.0),
            enemy_descent_speed: 6.0,
            hover_altitude: Span::new(50, (HEIGHT as u32) / 2),
            fire_interval: Span::new(50, 300),
            enemy_variants: 3,

            bomb_speed: 6.0,
            bomb_radius: Span::new(10, 50),
            bomb_colors: 6,

            beam_speed: 10.0,
            beam_size: Vec2::new(60.0, 20.0),
            fan_count: 10,
            fan_arc: 100.0,

            explosion_size: Vec2::new(100.0, 100.0),
            enemy_explosion_life: 100,
            bomb_explosion_life: 50,
            shield_explosion_life: 30,

            emp_cost: 1,
            gravity_cost: 200,
            gravity_life: 400,
            shield_cost: 50,
            shield_life: 400,
            shield_thickness: 20.0,

            enemy_reward: ENEMY_REWARD,
            bomb_reward: BOMB_REWARD,
            score_position: Vec2::new(100.0, HEIGHT - 50.0),

            defeat_pause_ms: 2000,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning table from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Check values the simulation divides by or samples from
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.area.width <= 0.0 || self.area.height <= 0.0 {
            return invalid("play area must have a positive size");
        }
        if self.ticks_per_second == 0 {
            return invalid("ticks_per_second must be positive");
        }
        if self.enemy_spawn_interval == 0 {
            return invalid("enemy_spawn_interval must be positive");
        }
        if self.fire_interval.min == 0 || self.fire_interval.min > self.fire_interval.max {
            return invalid("fire_interval must be a non-empty range above zero");
        }
        if self.hover_altitude.min > self.hover_altitude.max {
            return invalid("hover_altitude range is empty");
        }
        if self.bomb_radius.min == 0 || self.bomb_radius.min > self.bomb_radius.max {
            return invalid("bomb_radius must be a non-empty range above zero");
        }
        if self.enemy_variants == 0 || self.bomb_colors == 0 {
            return invalid("enemy_variants and bomb_colors must be positive");
        }
        if self.fan_count < 2 {
            return invalid("fan_count must be at least 2");
        }
        if self.bomb_speed <= 0.0 || self.beam_speed <= 0.0 {
            return invalid("projectile speeds must be positive");
        }
        let start = crate::sim::geometry::Rect::from_center(self.avatar_start, self.avatar_size);
        if !self.area.contains(&start) {
            return invalid("avatar must start inside the play area");
        }
        Ok(())
    }

    /// Wall-clock duration of one tick. A zero rate counts as one tick per second.
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_nanos(1_000_000_000 / self.ticks_per_second.max(1) as u64)
    }
}
