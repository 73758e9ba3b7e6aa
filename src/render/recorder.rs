//! Headless canvas that records draw calls instead of painting them

use serde::Serialize;

use super::{Canvas, Overlay};
use crate::sim::{Rect, Sprite};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Background,
    Sprite { sprite: Sprite, rect: Rect },
    Overlay { overlay: Overlay, rect: Rect },
}

/// Keeps the commands of the frame in progress and of the last presented one
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pending: Vec<DrawCommand>,
    last: Vec<DrawCommand>,
    presented: u64,
}

impl FrameRecorder {
    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    /// Sprites of the last frame, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.last.iter().filter_map(|cmd| match cmd {
            DrawCommand::Sprite { sprite, .. } => Some(sprite),
            _ => None,
        })
    }
}

impl Canvas for FrameRecorder {
    fn background(&mut self) {
        self.pending.clear();
        self.pending.push(DrawCommand::Background);
    }

    fn draw(&mut self, sprite: Sprite, rect: Rect) {
        self.pending.push(DrawCommand::Sprite { sprite, rect });
    }

    fn overlay(&mut self, overlay: Overlay, rect: Rect) {
        self.pending.push(DrawCommand::Overlay { overlay, rect });
    }

    fn present(&mut self) {
        self.last = std::mem::take(&mut self.pending);
        self.presented += 1;
    }
}
