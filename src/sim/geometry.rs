//! Axis-aligned rectangles and play-area bounds
//!
//! Screen coordinates: origin at the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle stored as top-left corner + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.min = center - self.size * 0.5;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.min += delta;
    }

    /// Strict overlap test; rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// The fixed-size play area every bounded entity must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: crate::consts::WIDTH,
            height: crate::consts::HEIGHT,
        }
    }
}

impl PlayArea {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Per-axis containment: `(horizontal, vertical)`, each true iff the
    /// rectangle lies entirely inside the area on that axis.
    pub fn within_bounds(&self, rect: &Rect) -> (bool, bool) {
        let horizontal = rect.left() >= 0.0 && rect.right() <= self.width;
        let vertical = rect.top() >= 0.0 && rect.bottom() <= self.height;
        (horizontal, vertical)
    }

    /// True iff the rectangle is inside on both axes
    pub fn contains(&self, rect: &Rect) -> bool {
        self.within_bounds(rect) == (true, true)
    }

    /// Rectangle covering the whole area (used for full-screen overlays)
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Unit vector pointing from `from` toward `to`.
///
/// Returns `None` when the points coincide, since the displacement has no
/// direction.
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Size of the axis-aligned box enclosing a `size` sprite rotated by `degrees`
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(
        size.x * cos + size.y * sin,
        size.x * sin + size.y * cos,
    )
}
