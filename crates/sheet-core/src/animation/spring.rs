#![forbid(unsafe_code)]

//! Damped harmonic response curve for time-bounded settle animations.
//!
//! Unlike an integrated spring, the curve is evaluated analytically so a
//! settle animation with a fixed duration is reproducible frame by frame.
//! It describes the normalized displacement `x(t)` of a unit step response:
//!
//!   x(0) = 0, x'(0) = v0, x(t) → 1
//!
//! # Parameters
//!
//! - **damping ratio** (ζ): `1.0` is critically damped (fastest convergence
//!   without overshoot); values below `1.0` overshoot and oscillate.
//! - **initial velocity** (v0): in units of the whole distance per second.
//!   `1.0` means the sheet starts moving as if it would cover the full
//!   distance in one second.
//!
//! The natural frequency is chosen so the oscillation envelope has decayed
//! to [`SETTLE_FRACTION`] by the end of the configured duration.
//!
//! # Invariants
//!
//! 1. `response(0.0) == 0.0`.
//! 2. With ζ ≥ 1 and v0 ≤ ω the response never overshoots 1.
//!
//! # Failure Modes
//!
//! - ζ = 0: the envelope never decays; the frequency is computed from a
//!   floor of [`MIN_ENVELOPE_DAMPING`] and the owning animation snaps to the
//!   target when its duration elapses.

use std::time::Duration;

/// Envelope amplitude left when the configured duration elapses.
pub const SETTLE_FRACTION: f64 = 0.001;

/// Damping floor used when deriving the natural frequency.
pub const MIN_ENVELOPE_DAMPING: f64 = 0.05;

/// Analytic damped spring response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringCurve {
    damping: f64,
    initial_velocity: f64,
    omega: f64,
}

impl SpringCurve {
    /// Build a curve that settles within `duration`.
    #[must_use]
    pub fn new(damping: f64, initial_velocity: f64, duration: Duration) -> Self {
        let secs = duration.as_secs_f64().max(f64::EPSILON);
        let decay = -SETTLE_FRACTION.ln();
        let omega = decay / (damping.clamp(MIN_ENVELOPE_DAMPING, 1.0) * secs);
        Self {
            damping,
            initial_velocity,
            omega,
        }
    }

    /// Natural angular frequency (rad/s).
    #[inline]
    #[must_use]
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Damping ratio.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Critical damping (ζ = 1) for the current frequency.
    #[inline]
    #[must_use]
    pub fn is_critically_damped(&self) -> bool {
        self.damping >= 1.0
    }

    /// Normalized displacement after `t` seconds.
    #[must_use]
    pub fn response(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let w = self.omega;
        let v0 = self.initial_velocity;

        if self.is_critically_damped() {
            let envelope = (-w * t).exp();
            return 1.0 - envelope * (1.0 + (w - v0) * t);
        }

        let zeta = self.damping;
        let wd = w * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * w * t).exp();
        let b = (zeta * w - v0) / wd;
        1.0 - envelope * ((wd * t).cos() + b * (wd * t).sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIX_HUNDRED_MS: Duration = Duration::from_millis(600);

    #[test]
    fn starts_at_zero() {
        let curve = SpringCurve::new(0.8, 1.0, SIX_HUNDRED_MS);
        assert_eq!(curve.response(0.0), 0.0);
        assert_eq!(curve.response(-1.0), 0.0);
    }

    #[test]
    fn settles_near_one_at_duration() {
        for damping in [0.3, 0.8, 1.0] {
            let curve = SpringCurve::new(damping, 1.0, SIX_HUNDRED_MS);
            let end = curve.response(0.6);
            assert!((end - 1.0).abs() < 0.01, "damping {damping}: {end}");
        }
    }

    #[test]
    fn initial_slope_matches_velocity() {
        let curve = SpringCurve::new(0.8, 2.0, SIX_HUNDRED_MS);
        let h = 1e-7;
        let slope = curve.response(h) / h;
        assert!((slope - 2.0).abs() < 1e-3, "slope {slope}");
    }

    #[test]
    fn critical_damping_does_not_overshoot() {
        let curve = SpringCurve::new(1.0, 0.0, SIX_HUNDRED_MS);
        for i in 0..=600 {
            let x = curve.response(f64::from(i) / 1000.0);
            assert!(x <= 1.0 + 1e-12, "overshoot at {i}ms: {x}");
        }
    }

    #[test]
    fn underdamped_overshoots() {
        let curve = SpringCurve::new(0.2, 0.0, SIX_HUNDRED_MS);
        let peak = (0..=600)
            .map(|i| curve.response(f64::from(i) / 1000.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "peak {peak}");
    }

    #[test]
    fn frequency_scales_inversely_with_duration() {
        let short = SpringCurve::new(0.8, 1.0, Duration::from_millis(300));
        let long = SpringCurve::new(0.8, 1.0, SIX_HUNDRED_MS);
        assert!((short.omega() - 2.0 * long.omega()).abs() < 1e-9);
    }

    #[test]
    fn zero_damping_uses_floor_for_frequency() {
        let curve = SpringCurve::new(0.0, 1.0, SIX_HUNDRED_MS);
        assert!(curve.omega().is_finite());
        assert!(curve.response(0.3).is_finite());
    }
}
