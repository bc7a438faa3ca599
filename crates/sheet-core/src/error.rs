#![forbid(unsafe_code)]

//! Programming-error values for sheet configuration and lifecycle misuse.
//!
//! Every variant indicates an integration bug rather than a runtime
//! condition. Callers are expected to treat them as unrecoverable; nothing in
//! this workspace clamps or coerces a bad value into a good one.

use std::fmt;

use crate::position::Position;

/// Misuse of the sheet API or an invalid configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Coverage fractions violate `0 < collapsed < expanded <= 1`.
    InvalidCoverage { collapsed: f64, expanded: f64 },
    /// `Dismissed` was requested as the initial presentation position.
    DismissedInitialPosition,
    /// An animation parameter is out of range or not finite.
    InvalidAnimation { field: &'static str, value: f64 },
    /// The presenting surface reported a height that cannot anchor offsets.
    InvalidSurfaceHeight { height: f64 },
    /// The operation needs a captured presenting surface.
    NotPresented,
    /// `present` was called on a sheet that is already presented.
    AlreadyPresented,
    /// The sheet finished dismissing and can no longer be used.
    Detached,
    /// The presenting surface was dropped by its owner.
    SurfaceReleased,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoverage {
                collapsed,
                expanded,
            } => write!(
                f,
                "coverage must satisfy 0 < collapsed < expanded <= 1 (got collapsed={collapsed}, expanded={expanded})"
            ),
            Self::DismissedInitialPosition => {
                write!(f, "{} is not a valid initial position", Position::Dismissed)
            }
            Self::InvalidAnimation { field, value } => {
                write!(f, "animation {field} out of range (got {value})")
            }
            Self::InvalidSurfaceHeight { height } => {
                write!(f, "presenting surface height must be finite and > 0 (got {height})")
            }
            Self::NotPresented => write!(f, "sheet has not captured a presenting surface"),
            Self::AlreadyPresented => write!(f, "sheet is already presented"),
            Self::Detached => write!(f, "sheet was dismissed and detached; create a new one"),
            Self::SurfaceReleased => write!(f, "presenting surface is no longer alive"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_values() {
        let err = ConfigurationError::InvalidCoverage {
            collapsed: 0.9,
            expanded: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("collapsed=0.9"), "{msg}");
        assert!(msg.contains("expanded=0.5"), "{msg}");
    }

    #[test]
    fn display_dismissed_initial_position() {
        let msg = ConfigurationError::DismissedInitialPosition.to_string();
        assert!(msg.contains("dismissed"), "{msg}");
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&ConfigurationError::Detached);
    }
}
