#![forbid(unsafe_code)]

//! Time-bounded offset transitions toward a discrete position.
//!
//! # Invariants
//!
//! - `value()` equals `from` before the first tick and exactly `to` once
//!   complete; intermediate values may overshoot `to` when underdamped.
//! - Zero-duration animations complete on the first tick, whatever its delta.
//! - The target position and generation never change after construction.

use std::time::Duration;

use super::{Animation, AnimationConfig, Easing, SpringCurve};
use crate::position::Position;

/// Transition of the sheet's top offset toward `target`.
#[derive(Debug, Clone)]
pub struct OffsetAnimation {
    from: f64,
    to: f64,
    target: Position,
    generation: u64,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    curve: SpringCurve,
    complete: bool,
}

impl OffsetAnimation {
    /// Animate from `from` to `to` under `config`.
    #[must_use]
    pub fn new(
        from: f64,
        to: f64,
        target: Position,
        generation: u64,
        config: &AnimationConfig,
    ) -> Self {
        Self {
            from,
            to,
            target,
            generation,
            duration: config.duration,
            elapsed: Duration::ZERO,
            easing: config.easing,
            curve: config.curve(),
            complete: false,
        }
    }

    /// Position this animation settles into.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Position {
        self.target
    }

    /// Generation that started this animation.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starting offset.
    #[inline]
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Final offset.
    #[inline]
    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Time fraction in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.complete {
            return 1.0;
        }
        let total = self.duration.as_secs_f64();
        if total <= 0.0 {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / total).min(1.0)
    }
}

impl Animation for OffsetAnimation {
    fn tick(&mut self, dt: Duration) {
        if self.complete {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.complete = true;
        }
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn value(&self) -> f64 {
        if self.complete {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        let t = eased * self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.curve.response(t)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.complete = false;
    }
}
