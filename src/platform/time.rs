//! Tick pacing

use std::time::{Duration, Instant};

/// Paces the session loop. This is the only place the session blocks.
pub trait FrameClock {
    /// Block until the next tick boundary
    fn wait_next_tick(&mut self);
    /// Block for a fixed wall-clock span (the defeat pause)
    fn pause(&mut self, span: Duration);
}

/// Sleeps out whatever is left of each tick period
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    period: Duration,
    frame_start: Instant,
}

impl FixedRateClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            frame_start: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameClock for FixedRateClock {
    fn wait_next_tick(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.period {
            std::thread::sleep(self.period - elapsed);
        } else if elapsed > self.period * 4 {
            log::trace!("tick overran by {:?}", elapsed - self.period);
        }
        self.frame_start = Instant::now();
    }

    fn pause(&mut self, span: Duration) {
        std::thread::sleep(span);
        self.frame_start = Instant::now();
    }
}

/// Never blocks; counts what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct NullClock {
    pub ticks: u64,
    pub paused: Duration,
}

impl FrameClock for NullClock {
    fn wait_next_tick(&mut self) {
        self.ticks += 1;
    }

    fn pause(&mut self, span: Duration) {
        self.paused += span;
    }
}
