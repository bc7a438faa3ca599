#![forbid(unsafe_code)]

//! Settle animation primitives.
//!
//! - [`Easing`]: time-shaping curves.
//! - [`SpringCurve`]: damped response evaluated over eased time.
//! - [`OffsetAnimation`]: a time-bounded transition of the sheet's top offset
//!   toward a discrete position, tagged with the generation that started it.
//! - [`FrameTicker`]: converts host timestamps into frame deltas.
//!
//! All animations are advanced explicitly with [`Animation::tick`]; nothing
//! in this module schedules work on its own.

pub mod easing;
pub mod spring;
pub mod tween;

use std::time::Duration;

use web_time::Instant;

use crate::error::ConfigurationError;

pub use easing::Easing;
pub use spring::SpringCurve;
pub use tween::OffsetAnimation;

/// A value that advances with time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current value.
    fn value(&self) -> f64;

    /// Restart from the beginning.
    fn reset(&mut self);
}

/// Timing parameters for settle animations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AnimationConfig {
    /// Total settle duration.
    #[cfg_attr(feature = "config", serde(with = "duration_secs"))]
    pub duration: Duration,
    /// Damping ratio in `[0, 1]`; `1.0` settles without overshoot.
    pub damping: f64,
    /// Initial velocity in whole-distance units per second.
    pub initial_velocity: f64,
    /// Time-shaping curve.
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            damping: 0.8,
            initial_velocity: 1.0,
            easing: Easing::EaseInOut,
        }
    }
}

impl AnimationConfig {
    /// Create a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions complete on the next tick.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Short, critically damped, linear transitions.
    #[must_use]
    pub fn reduced_motion() -> Self {
        Self {
            duration: Duration::from_millis(150),
            damping: 1.0,
            initial_velocity: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Set duration.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set damping ratio.
    #[must_use]
    pub fn damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set initial velocity.
    #[must_use]
    pub fn initial_velocity(mut self, velocity: f64) -> Self {
        self.initial_velocity = velocity;
        self
    }

    /// Set easing curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Check that every numeric field is well formed.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.damping.is_finite() || !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigurationError::InvalidAnimation {
                field: "damping",
                value: self.damping,
            });
        }
        if !self.initial_velocity.is_finite() {
            return Err(ConfigurationError::InvalidAnimation {
                field: "initial_velocity",
                value: self.initial_velocity,
            });
        }
        Ok(())
    }

    /// Spring curve described by this configuration.
    #[must_use]
    pub fn curve(&self) -> SpringCurve {
        SpringCurve::new(self.damping, self.initial_velocity, self.duration)
    }
}

#[cfg(feature = "config")]
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|err| {
            serde::de::Error::custom(format!("invalid duration {secs}s: {err}"))
        })
    }
}

/// Converts host frame timestamps into deltas.
///
/// The first call after construction or [`reset`](FrameTicker::reset)
/// returns [`Duration::ZERO`]. Timestamps that go backwards also yield zero.
#[derive(Debug, Clone, Default)]
pub struct FrameTicker {
    last: Option<Instant>,
}

impl FrameTicker {
    /// Create a ticker with no reference frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now` and return the time since the previous frame.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        dt
    }

    /// Forget the reference frame.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
