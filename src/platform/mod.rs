//! Platform abstraction layer
//!
//! The simulation only sees what these collaborators hand it:
//! - Input: held actions sampled once per tick, turned into edge-triggered
//!   [`TickInput`](crate::sim::TickInput)s
//! - Time: a clock that blocks until the next tick boundary
//!
//! Windowing backends plug in by implementing [`InputSource`] and
//! [`FrameClock`]; the headless ones here drive the binary and the tests.

pub mod autopilot;
pub mod input;
pub mod time;

pub use autopilot::Autopilot;
pub use input::{ActionState, EdgeTracker, InputSource, ScriptedInput, TickLimit};
pub use time::{FixedRateClock, FrameClock, NullClock};
