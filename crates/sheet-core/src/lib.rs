#![forbid(unsafe_code)]

//! Core: position model, offset resolution, animation curves, and drag input.
//!
//! # Role in the workspace
//! `sheet-core` is the pure layer. It owns the discrete [`Position`] model,
//! the coverage configuration and its invariants, the resolver that maps a
//! released drag onto a position, the animation curves used to settle, and
//! the recognizer that turns raw pointer samples into drag events.
//!
//! # Primary responsibilities
//! - **Position / CoverageConfig**: the three anchors and their validation.
//! - **Resolver**: `offset_for_position` and `position_for_coverage`.
//! - **Animation**: easing, damped spring curve, time-bounded offset tweens.
//! - **Gesture**: vertical drag recognition and drag lifecycle events.
//! - **Config**: grouped tunables, optionally loaded from TOML or JSON.
//!
//! # How it fits in the system
//! `sheet-widgets` builds the stateful `Sheet` controller on top of these
//! types. Nothing in this crate holds references to a host surface or fires
//! callbacks, so everything here is deterministic and side-effect free.
//!
//! [`Position`]: position::Position

pub mod animation;
pub mod config;
pub mod error;
pub mod gesture;
pub mod logging;
pub mod position;

pub use error::ConfigurationError;
pub use position::{CoverageConfig, Position};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
