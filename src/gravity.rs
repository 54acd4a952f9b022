//! Fixed-interval gravity: turns real elapsed time into session steps.

use crate::game::Session;
use log::trace;
use std::time::Duration;

/// Default time between automatic one-row drops.
pub const DEFAULT_DROP_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct GravityClock {
    interval: Duration,
    accumulator: Duration,
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new(DEFAULT_DROP_INTERVAL)
    }
}

impl GravityClock {
    /// `interval` must be non-zero; a zero interval is bumped to 1 ms.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Feed real elapsed time; runs every due step (catch-up after a stall).
    /// Time passing while the session is paused or over is discarded.
    /// Returns the number of steps taken.
    pub fn advance(&mut self, elapsed: Duration, session: &mut Session) -> u32 {
        if !session.is_running() {
            return 0;
        }
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            session.step();
            steps += 1;
            if !session.is_running() {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        if steps > 1 {
            trace!("gravity caught up {} steps", steps);
        }
        steps
    }
}
