#![forbid(unsafe_code)]

//! Fixed-step frame clock.
//!
//! Produces evenly spaced [`Instant`]s from a fixed origin so that
//! [`Sheet::tick_at`] sees the same deltas on every run. The step defaults
//! to 16 ms and can be overridden with `SHEET_TEST_FRAME_MS`.

use std::time::Duration;

use sheet_widgets::Sheet;
use tracing::debug_span;
use web_time::Instant;

const DEFAULT_FRAME_MS: u64 = 16;

/// Frame step from `SHEET_TEST_FRAME_MS`, or 16 ms.
#[must_use]
pub fn frame_step_ms() -> u64 {
    std::env::var("SHEET_TEST_FRAME_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_FRAME_MS)
}

/// Deterministic frame timestamps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    step: Duration,
    frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(frame_step_ms()))
    }
}

impl FrameClock {
    /// Clock advancing by `step` per frame.
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            step,
            frame: 0,
        }
    }

    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Frames produced so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Timestamp of the current frame.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    /// Time since the origin.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.step
            .saturating_mul(u32::try_from(self.frame).unwrap_or(u32::MAX))
    }

    /// Move to the next frame and return its timestamp.
    pub fn advance(&mut self) -> Instant {
        self.frame += 1;
        self.now()
    }

    /// Tick `sheet` with fixed deltas until no animation is in flight.
    ///
    /// Returns the number of frames used, or `None` if the animation was
    /// still running after `max_frames`.
    pub fn run_until_idle<C>(&mut self, sheet: &mut Sheet<C>, max_frames: usize) -> Option<usize> {
        let _span = debug_span!("sheet.harness.run", sheet = sheet.id().get(), max_frames).entered();
        for used in 0..max_frames {
            if !sheet.is_animating() {
                return Some(used);
            }
            sheet.tick(self.step);
            self.frame += 1;
        }
        (!sheet.is_animating()).then_some(max_frames)
    }

    /// Tick `sheet` with timestamps for `frames` frames.
    pub fn drive<C>(&mut self, sheet: &mut Sheet<C>, frames: usize) {
        for _ in 0..frames {
            let now = self.advance();
            sheet.tick_at(now);
        }
    }
}
