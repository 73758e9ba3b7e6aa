//! Input sampling
//!
//! A backend reports which actions are held right now ([`ActionState`]).
//! [`EdgeTracker`] compares consecutive snapshots so that triggers act once
//! per press, no matter how long the key stays down.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, TickInput};

/// Which logical actions are held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fan_modifier: bool,
    pub fire: bool,
    pub emp: bool,
    pub gravity: bool,
    pub shield: bool,
    pub quit: bool,
}

/// Turns held snapshots into per-tick input with "just pressed" triggers
#[derive(Debug, Clone, Default)]
pub struct EdgeTracker {
    previous: ActionState,
}

impl EdgeTracker {
    pub fn sample(&mut self, held: ActionState) -> TickInput {
        let prev = std::mem::replace(&mut self.previous, held);
        TickInput {
            up: held.up,
            down: held.down,
            left: held.left,
            right: held.right,
            fan_modifier: held.fan_modifier,
            fire: held.fire && !prev.fire,
            emp: held.emp && !prev.emp,
            gravity: held.gravity && !prev.gravity,
            shield: held.shield && !prev.shield,
        }
    }
}

/// Supplies one input snapshot per tick
pub trait InputSource {
    /// Read this tick's input. `None` means the player asked to quit.
    ///
    /// The state is read-only context for sources that react to the game
    /// (demo players); device-backed sources ignore it.
    fn poll(&mut self, state: &GameState) -> Option<TickInput>;
}

/// Replays a fixed sequence of held-action frames, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<ActionState>,
    edges: EdgeTracker,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = ActionState>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            edges: EdgeTracker::default(),
        }
    }

    /// Append `ticks` frames with `held` pressed
    pub fn hold(mut self, held: ActionState, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(held, ticks));
        self
    }

    /// Append `ticks` frames with nothing pressed
    pub fn idle(self, ticks: usize) -> Self {
        self.hold(ActionState::default(), ticks)
    }

    /// Append a single-frame press followed by one release frame
    pub fn tap(self, held: ActionState) -> Self {
        self.hold(held, 1).idle(1)
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> Option<TickInput> {
        let held = self.frames.pop_front()?;
        if held.quit {
            return None;
        }
        Some(self.edges.sample(held))
    }
}

/// Wraps another source and quits after a fixed number of ticks
#[derive(Debug, Clone)]
pub struct TickLimit<S> {
    inner: S,
    left: u64,
}

impl<S: InputSource> TickLimit<S> {
    pub fn new(inner: S, ticks: u64) -> Self {
        Self { inner, left: ticks }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: InputSource> InputSource for TickLimit<S> {
    fn poll(&mut self, state: &GameState) -> Option<TickInput> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;
        self.inner.poll(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire() -> ActionState {
        ActionState {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_held_trigger_fires_once() {
        let mut edges = EdgeTracker::default();
        assert!(edges.sample(fire()).fire);
        assert!(!edges.sample(fire()).fire);
        assert!(!edges.sample(ActionState::default()).fire);
        assert!(edges.sample(fire()).fire);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut edges = EdgeTracker::default();
        let left = ActionState {
            left: true,
            fan_modifier: true,
            ..Default::default()
        };
        for _ in 0..3 {
            let input = edges.sample(left);
            assert!(input.left);
            assert!(input.fan_modifier);
        }
    }

    #[test]
    fn test_script_runs_out_then_quits() {
        let state = GameState::new(1);
        let mut script = ScriptedInput::default().hold(fire(), 2).idle(1);
        assert_eq!(script.remaining(), 3);
        assert!(script.poll(&state).is_some_and(|i| i.fire));
        assert!(script.poll(&state).is_some_and(|i| !i.fire));
        assert!(script.poll(&state).is_some());
        assert!(script.poll(&state).is_none());
    }

    #[test]
    fn test_quit_frame_stops_script() {
        let state = GameState::new(1);
        let quit = ActionState {
            quit: true,
            ..Default::default()
        };
        let mut script = ScriptedInput::default().idle(1).hold(quit, 1).idle(5);
        assert!(script.poll(&state).is_some());
        assert!(script.poll(&state).is_none());
    }

    #[test]
    fn test_tick_limit() {
        let state = GameState::new(1);
        let mut limited = TickLimit::new(ScriptedInput::default().idle(10), 2);
        assert!(limited.poll(&state).is_some());
        assert!(limited.poll(&state).is_some());
        assert!(limited.poll(&state).is_none());
        assert_eq!(limited.into_inner().remaining(), 8);
    }
}
