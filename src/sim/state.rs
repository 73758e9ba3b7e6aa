//! Game state and core simulation types
//!
//! The world owns every entity; entities never hold references to each other.
//! Cross-entity relationships (a bomb aimed at the avatar, a shield anchored
//! to it) are captured as plain values at construction time.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, direction, rotated_extent};
use crate::tuning::{Span, Tuning, TuningError};
use crate::{screen_angle, screen_heading};

/// One of the eight directions the avatar can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::East,
        Facing::NorthEast,
        Facing::North,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
        Facing::South,
        Facing::SouthEast,
    ];

    /// Facing for a summed input step; `None` for the zero step
    pub fn from_step(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Facing::East),
            (1, -1) => Some(Facing::NorthEast),
            (0, -1) => Some(Facing::North),
            (-1, -1) => Some(Facing::NorthWest),
            (-1, 0) => Some(Facing::West),
            (-1, 1) => Some(Facing::SouthWest),
            (0, 1) => Some(Facing::South),
            (1, 1) => Some(Facing::SouthEast),
            _ => None,
        }
    }

    /// Raw grid step (components in -1..=1, diagonals not normalized)
    pub fn step(self) -> Vec2 {
        match self {
            Facing::East => Vec2::new(1.0, 0.0),
            Facing::NorthEast => Vec2::new(1.0, -1.0),
            Facing::North => Vec2::new(0.0, -1.0),
            Facing::NorthWest => Vec2::new(-1.0, -1.0),
            Facing::West => Vec2::new(-1.0, 0.0),
            Facing::SouthWest => Vec2::new(-1.0, 1.0),
            Facing::South => Vec2::new(0.0, 1.0),
            Facing::SouthEast => Vec2::new(1.0, 1.0),
        }
    }

    /// Screen angle in degrees (East = 0, North = 90)
    pub fn angle(self) -> f32 {
        screen_angle(self.step())
    }
}

/// Avatar expression shown alongside the facing pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Normal,
    /// Just shot down an enemy; cleared by the next move
    Cheer,
    /// Hit by a live bomb
    Defeated,
}

/// Opaque visual handle; the display collaborator maps these to assets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sprite {
    Avatar { facing: Facing, mood: Mood },
    Enemy { variant: u8, inverted: bool },
    Bomb { radius: u32, color: u8 },
    Beam { angle: f32 },
    Explosion { frame: u8 },
    Shield { angle: f32 },
    Score(u64),
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub rect: Rect,
    pub facing: Facing,
    pub speed: f32,
    pub mood: Mood,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::from_center(tuning.avatar_start, tuning.avatar_size),
            facing: Facing::East,
            speed: tuning.avatar_speed,
            mood: Mood::Normal,
        }
    }

    /// Move one step along `(dx, dy)`; the move is reverted if it would leave
    /// the play area. Facing follows any nonzero request, even a blocked one.
    pub fn steer(&mut self, dx: i32, dy: i32, area: &super::geometry::PlayArea) {
        let delta = Vec2::new(dx as f32, dy as f32) * self.speed;
        self.rect.translate(delta);
        if !area.contains(&self.rect) {
            self.rect.translate(-delta);
        }
        if let Some(facing) = Facing::from_step(dx, dy) {
            self.facing = facing;
            self.mood = Mood::Normal;
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Avatar {
            facing: self.facing,
            mood: self.mood,
        }
    }
}

/// Enemy locomotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    Descending,
    Hovering,
}

/// A descending enemy craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub vy: f32,
    /// y-coordinate past which descent stops
    pub hover_altitude: f32,
    /// Ticks between drops while hovering
    pub fire_interval: u32,
    pub phase: EnemyPhase,
    /// Set by EMP; suppresses firing forever
    pub disabled: bool,
    pub variant: u8,
}

impl Enemy {
    pub fn spawn(id: u32, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let x = rng.random_range(0..=tuning.area.width as u32) as f32;
        Self {
            id,
            rect: Rect::from_center(Vec2::new(x, 0.0), tuning.enemy_size),
            vy: tuning.enemy_descent_speed,
            hover_altitude: roll(rng, tuning.hover_altitude) as f32,
            fire_interval: roll(rng, tuning.fire_interval),
            phase: EnemyPhase::Descending,
            disabled: false,
            variant: rng.random_range(0..tuning.enemy_variants),
        }
    }

    /// Advance one tick: stop once past the hover altitude, then move.
    pub fn update(&mut self) {
        if self.phase == EnemyPhase::Descending && self.rect.center().y > self.hover_altitude {
            self.vy = 0.0;
            self.phase = EnemyPhase::Hovering;
            log::trace!("enemy {} hovering at y={}", self.id, self.rect.center().y);
        }
        self.rect.translate(Vec2::new(0.0, self.vy));
    }

    /// Whether this enemy drops a bomb on global tick `tick`.
    /// Enemies sharing an interval fire in lockstep.
    pub fn fires_at(&self, tick: u64) -> bool {
        self.phase == EnemyPhase::Hovering
            && !self.disabled
            && tick.is_multiple_of(self.fire_interval as u64)
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Enemy {
            variant: self.variant,
            inverted: self.disabled,
        }
    }
}

/// Bomb threat level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombState {
    Active,
    /// Neutralized by EMP; harmless on contact
    Disabled,
}

/// A projectile dropped by a hovering enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub rect: Rect,
    /// Unit direction fixed at spawn
    pub vel: Vec2,
    pub speed: f32,
    pub radius: u32,
    pub color: u8,
    pub state: BombState,
}

impl Bomb {
    /// Drop a bomb from the bottom-center of `from`, aimed at `target`.
    pub fn spawn(id: u32, from: &Rect, target: Vec2, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let radius = roll(rng, tuning.bomb_radius);
        let color = rng.random_range(0..tuning.bomb_colors);
        let origin = Vec2::new(from.center().x, from.center().y + from.height() / 2.0);
        let diameter = (2 * radius) as f32;
        // An enemy sitting exactly on the avatar's center has nothing to aim at
        let vel = direction(from.center(), target).unwrap_or(Vec2::Y);

        Self {
            id,
            rect: Rect::from_center(origin, Vec2::splat(diameter)),
            vel,
            speed: tuning.bomb_speed,
            radius,
            color,
            state: BombState::Active,
        }
    }

    pub fn advance(&mut self) {
        self.rect.translate(self.vel * self.speed);
    }

    /// EMP hit: halve speed once and defuse
    pub fn disable(&mut self) {
        self.speed /= 2.0;
        self.state = BombState::Disabled;
    }

    pub fn is_active(&self) -> bool {
        self.state == BombState::Active
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Bomb {
            radius: self.radius,
            color: self.color,
        }
    }
}

/// A beam fired by the avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    pub speed: f32,
    /// Travel angle in degrees (also the sprite rotation)
    pub angle: f32,
}

impl Beam {
    /// Fire from `avatar` along its facing rotated by `offset` degrees.
    /// The beam appears at the avatar's edge in its direction of travel.
    pub fn fire(id: u32, avatar: &Avatar, offset: f32, tuning: &Tuning) -> Self {
        let angle = avatar.facing.angle() + offset;
        let vel = screen_heading(angle);
        let center = avatar.rect.center() + vel * avatar.rect.size * 0.5;
        Self {
            id,
            rect: Rect::from_center(center, rotated_extent(tuning.beam_size, angle)),
            vel,
            speed: tuning.beam_speed,
            angle,
        }
    }

    pub fn advance(&mut self) {
        self.rect.translate(self.vel * self.speed);
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Beam { angle: self.angle }
    }
}

/// Stationary blinking explosion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub rect: Rect,
    pub life: i32,
    pub frame: u8,
}

impl Explosion {
    pub fn new(id: u32, center: Vec2, size: Vec2, life: i32) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, size),
            life,
            frame: 0,
        }
    }

    /// Count down and pick the blink frame. Returns false once expired.
    pub fn decay(&mut self) -> bool {
        self.life -= 1;
        self.frame = self.life.div_euclid(10).rem_euclid(2) as u8;
        self.life >= 0
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Explosion { frame: self.frame }
    }
}

/// Directional barrier placed in front of the avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub id: u32,
    pub rect: Rect,
    pub life: i32,
    pub angle: f32,
}

impl Shield {
    /// Anchor to the avatar's current position and facing; does not follow it
    pub fn raise(id: u32, avatar: &Avatar, tuning: &Tuning) -> Self {
        let angle = avatar.facing.angle();
        let bar = Vec2::new(tuning.shield_thickness, avatar.rect.height() * 2.0);
        let center = avatar.rect.center() + avatar.facing.step() * avatar.rect.size;
        Self {
            id,
            rect: Rect::from_center(center, rotated_extent(bar, angle)),
            life: tuning.shield_life,
            angle,
        }
    }

    /// Returns false once expired
    pub fn decay(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Shield { angle: self.angle }
    }
}

/// Full-area field that destroys every enemy and bomb each tick it exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityField {
    pub id: u32,
    pub life: i32,
}

impl GravityField {
    /// Returns false once expired
    pub fn decay(&mut self) -> bool {
        self.life -= 1;
        self.life > 0
    }
}

/// Session score; never negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score(u64);

impl Score {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn credit(&mut self, amount: u64) {
        self.0 = self.0.saturating_add(amount);
    }

    /// Debit `cost` if affordable. Returns false (and changes nothing) otherwise.
    pub fn try_spend(&mut self, cost: u64) -> bool {
        match self.0.checked_sub(cost) {
            Some(rest) => {
                self.0 = rest;
                true
            }
            None => false,
        }
    }
}

/// Complete session state: the entity registry plus score and clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    /// Simulation tick counter (drives spawn and fire timers)
    pub time_ticks: u64,
    pub score: Score,
    pub avatar: Avatar,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    /// At most one shield at a time
    pub shield: Option<Shield>,
    pub gravity_fields: Vec<GravityField>,
    /// EMP fired this tick; the next frame draws the flash overlay once
    pub emp_flash: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new session state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a session state with custom tuning.
    ///
    /// `tuning` must pass [`Tuning::validate`]: spawning samples from its
    /// ranges and variant counts, which panics on empty ones. Use
    /// [`GameState::try_with_tuning`] for tuning that has not been checked.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            avatar: Avatar::new(&tuning),
            tuning,
            time_ticks: 0,
            score: Score::default(),
            enemies: Vec::new(),
            bombs: Vec::new(),
            beams: Vec::new(),
            explosions: Vec::new(),
            shield: None,
            gravity_fields: Vec::new(),
            emp_flash: false,
            next_id: 1,
        }
    }

    /// Validate `tuning`, then build the state
    pub fn try_with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::with_tuning(seed, tuning))
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, &mut self.rng, &self.tuning);
        log::debug!(
            "enemy {} spawned at x={} (hover {}, interval {})",
            id,
            enemy.rect.center().x,
            enemy.hover_altitude,
            enemy.fire_interval
        );
        self.enemies.push(enemy);
        id
    }

    /// Drop a bomb from `from`, aimed at the avatar's current center
    pub fn spawn_bomb(&mut self, from: &Rect) -> u32 {
        let id = self.next_entity_id();
        let target = self.avatar.rect.center();
        let bomb = Bomb::spawn(id, from, target, &mut self.rng, &self.tuning);
        self.bombs.push(bomb);
        id
    }

    /// Fire one beam at `offset` degrees from the avatar's facing
    pub fn spawn_beam(&mut self, offset: f32) -> u32 {
        let id = self.next_entity_id();
        let beam = Beam::fire(id, &self.avatar, offset, &self.tuning);
        self.beams.push(beam);
        id
    }

    pub fn spawn_explosion(&mut self, center: Vec2, life: i32) -> u32 {
        let id = self.next_entity_id();
        let size = self.tuning.explosion_size;
        self.explosions.push(Explosion::new(id, center, size, life));
        id
    }

    /// Raise a shield unless one already exists. Returns whether one was raised.
    pub fn spawn_shield(&mut self) -> bool {
        if self.shield.is_some() {
            return false;
        }
        let id = self.next_entity_id();
        self.shield = Some(Shield::raise(id, &self.avatar, &self.tuning));
        true
    }

    pub fn spawn_gravity_field(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.gravity_fields.push(GravityField {
            id,
            life: self.tuning.gravity_life,
        });
        id
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.bombs.sort_by_key(|b| b.id);
        self.beams.sort_by_key(|b| b.id);
        self.explosions.sort_by_key(|e| e.id);
        self.gravity_fields.sort_by_key(|g| g.id);
    }
}

fn roll(rng: &mut Pcg32, span: Span) -> u32 {
    rng.random_range(span.min..=span.max)
}
