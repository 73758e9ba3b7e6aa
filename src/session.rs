//! One play session: input, tick, render, wait, until defeat or quit

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::platform::{FrameClock, InputSource};
use crate::render::{Canvas, render_frame};
use crate::sim::{GameState, TickOutcome, tick};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A live bomb reached the avatar
    Defeat,
    /// The input source asked to stop
    Quit,
}

/// Run ticks until the session ends.
///
/// Quit is checked when input is read, before any simulation for that tick.
/// On defeat the final frame (avatar in its defeated pose) is rendered and the
/// clock pauses for the configured span before returning. The state is left
/// as it was at the end so callers can inspect or dump it.
pub fn run_session<I, K, C>(
    state: &mut GameState,
    input: &mut I,
    clock: &mut K,
    canvas: &mut C,
) -> Outcome
where
    I: InputSource + ?Sized,
    K: FrameClock + ?Sized,
    C: Canvas + ?Sized,
{
    log::info!(
        "Session starting (seed {}, {} ticks/s)",
        state.seed,
        state.tuning.ticks_per_second
    );

    let outcome = loop {
        let Some(frame) = input.poll(state) else {
            break Outcome::Quit;
        };

        match tick(state, &frame) {
            TickOutcome::Continue => {
                render_frame(state, canvas);
                clock.wait_next_tick();
            }
            TickOutcome::Defeat => {
                render_frame(state, canvas);
                clock.pause(Duration::from_millis(state.tuning.defeat_pause_ms));
                break Outcome::Defeat;
            }
        }
    };

    log::info!(
        "Session ended: {:?} after {} ticks, score {}",
        outcome,
        state.time_ticks,
        state.score.value()
    );
    outcome
}
