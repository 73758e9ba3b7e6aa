//! Frame composition
//!
//! The simulation never touches pixels. [`render_frame`] walks the state in
//! a fixed layer order and hands (sprite, rect) pairs to a [`Canvas`], which a
//! display backend implements. [`FrameRecorder`] is the headless canvas.

pub mod recorder;

pub use recorder::{DrawCommand, FrameRecorder};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Rect, Sprite};

/// Translucent full-area tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub rgba: [u8; 4],
}

/// Yellow flash shown once when EMP fires
pub const EMP_FLASH: Overlay = Overlay {
    rgba: [255, 255, 0, 128],
};

/// Dimming shown while a gravity field is alive
pub const GRAVITY_DIM: Overlay = Overlay {
    rgba: [0, 0, 0, 128],
};

/// Box the score text is centered in
const SCORE_BOX: Vec2 = Vec2::new(220.0, 40.0);

/// A fixed-size output surface
pub trait Canvas {
    /// Start a frame by painting the background
    fn background(&mut self);
    /// Composite one sprite at `rect`
    fn draw(&mut self, sprite: Sprite, rect: Rect);
    /// Blend a translucent tint over `rect`
    fn overlay(&mut self, overlay: Overlay, rect: Rect);
    /// Finish the frame
    fn present(&mut self);
}

/// Compose one frame. Layer order: background, avatar, beams, enemies,
/// bombs, gravity dimming, explosions, shield, score, EMP flash.
pub fn render_frame<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let area = state.tuning.area.rect();

    canvas.background();
    canvas.draw(state.avatar.sprite(), state.avatar.rect);
    for beam in &state.beams {
        canvas.draw(beam.sprite(), beam.rect);
    }
    for enemy in &state.enemies {
        canvas.draw(enemy.sprite(), enemy.rect);
    }
    for bomb in &state.bombs {
        canvas.draw(bomb.sprite(), bomb.rect);
    }
    if !state.gravity_fields.is_empty() {
        canvas.overlay(GRAVITY_DIM, area);
    }
    for explosion in &state.explosions {
        canvas.draw(explosion.sprite(), explosion.rect);
    }
    if let Some(shield) = &state.shield {
        canvas.draw(shield.sprite(), shield.rect);
    }
    canvas.draw(
        Sprite::Score(state.score.value()),
        Rect::from_center(state.tuning.score_position, SCORE_BOX),
    );
    if state.emp_flash {
        canvas.overlay(EMP_FLASH, area);
    }
    canvas.present();
}
