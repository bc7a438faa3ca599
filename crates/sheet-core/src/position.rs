#![forbid(unsafe_code)]

//! Discrete sheet positions and the offset resolver.
//!
//! A sheet is placed by a single scalar: its *top offset*, the distance from
//! the top of the presenting surface to the sheet's top edge. Each discrete
//! [`Position`] maps to a top offset through the surface height and a
//! [`CoverageConfig`]; a released drag maps back onto a position through
//! [`position_for_coverage`].
//!
//! # Invariants
//!
//! 1. `offset_for_position(Dismissed, h, _) == h` for every height.
//! 2. `0 < collapsed < expanded <= 1` holds for every constructed
//!    [`CoverageConfig`].
//! 3. Resolution ties go to the lower anchor.
//!
//! # Failure Modes
//!
//! - Coverage outside `[0, 1]` (fast flicks, drags past the surface edge) is
//!   valid input to the resolver and is never clamped.

use std::fmt;

use crate::error::ConfigurationError;

/// One of the three discrete resting positions of a sheet.
///
/// Ordered by screen coverage: `Dismissed < Collapsed < Expanded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum Position {
    /// Fully below the visible area.
    Dismissed,
    /// Partially covering the surface.
    Collapsed,
    /// Covering most of the surface.
    Expanded,
}

impl Position {
    /// All positions in ascending coverage order.
    pub const ALL: [Position; 3] = [Self::Dismissed, Self::Collapsed, Self::Expanded];

    /// Whether this position can be used as the initial presentation target.
    #[inline]
    #[must_use]
    pub fn is_presentable(self) -> bool {
        !matches!(self, Self::Dismissed)
    }

    /// Coverage anchor for this position under `config`.
    #[inline]
    #[must_use]
    pub fn anchor(self, config: &CoverageConfig) -> f64 {
        match self {
            Self::Dismissed => 0.0,
            Self::Collapsed => config.collapsed(),
            Self::Expanded => config.expanded(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dismissed => "dismissed",
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
        };
        f.write_str(name)
    }
}

/// Plain coverage fractions as written in configuration files.
///
/// Converted into a [`CoverageConfig`] through validation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RawCoverage {
    pub collapsed: f64,
    pub expanded: f64,
}

impl Default for RawCoverage {
    fn default() -> Self {
        CoverageConfig::default().into()
    }
}

/// Fraction of the surface height covered at the collapsed and expanded
/// positions.
///
/// Fields are private so the `0 < collapsed < expanded <= 1` invariant holds
/// for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCoverage", into = "RawCoverage")
)]
pub struct CoverageConfig {
    collapsed: f64,
    expanded: f64,
}

impl CoverageConfig {
    /// Default collapsed coverage.
    pub const DEFAULT_COLLAPSED: f64 = 0.5;
    /// Default expanded coverage.
    pub const DEFAULT_EXPANDED: f64 = 0.9;

    /// Validate and build a coverage configuration.
    pub fn new(collapsed: f64, expanded: f64) -> Result<Self, ConfigurationError> {
        let valid = collapsed.is_finite()
            && expanded.is_finite()
            && collapsed > 0.0
            && expanded > collapsed
            && expanded <= 1.0;
        if !valid {
            return Err(ConfigurationError::InvalidCoverage {
                collapsed,
                expanded,
            });
        }
        Ok(Self {
            collapsed,
            expanded,
        })
    }

    /// Coverage at [`Position::Collapsed`].
    #[inline]
    #[must_use]
    pub fn collapsed(&self) -> f64 {
        self.collapsed
    }

    /// Coverage at [`Position::Expanded`].
    #[inline]
    #[must_use]
    pub fn expanded(&self) -> f64 {
        self.expanded
    }
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            collapsed: Self::DEFAULT_COLLAPSED,
            expanded: Self::DEFAULT_EXPANDED,
        }
    }
}

impl TryFrom<RawCoverage> for CoverageConfig {
    type Error = ConfigurationError;

    fn try_from(raw: RawCoverage) -> Result<Self, Self::Error> {
        Self::new(raw.collapsed, raw.expanded)
    }
}

impl From<CoverageConfig> for RawCoverage {
    fn from(config: CoverageConfig) -> Self {
        Self {
            collapsed: config.collapsed,
            expanded: config.expanded,
        }
    }
}

/// Top offset of the sheet when resting at `position`.
///
/// This is also the value broadcast to position-changed subscribers.
#[inline]
#[must_use]
pub fn offset_for_position(position: Position, surface_height: f64, config: &CoverageConfig) -> f64 {
    surface_height * (1.0 - position.anchor(config))
}

/// Fraction of the surface covered by a sheet whose top edge sits at `offset`.
///
/// May be negative or exceed 1 for offsets past either surface edge.
#[inline]
#[must_use]
pub fn coverage_for_offset(offset: f64, surface_height: f64) -> f64 {
    1.0 - offset / surface_height
}

/// Resolve a released coverage fraction onto a discrete position.
///
/// Precedence:
/// 1. overshoot past full coverage, or strictly closer to the expanded
///    anchor than to the collapsed one, resolves to `Expanded`;
/// 2. otherwise strictly closer to the collapsed anchor than to zero
///    resolves to `Collapsed`;
/// 3. otherwise `Dismissed`.
///
/// Exact ties fail the strict comparisons and fall toward dismissal.
#[must_use]
pub fn position_for_coverage(coverage: f64, config: &CoverageConfig) -> Position {
    let distance = |position: Position| (coverage - position.anchor(config)).abs();
    let to_expanded = distance(Position::Expanded);
    let to_collapsed = distance(Position::Collapsed);
    let to_dismissed = distance(Position::Dismissed);

    if coverage > 1.0 || to_expanded < to_collapsed {
        Position::Expanded
    } else if to_collapsed < to_dismissed {
        Position::Collapsed
    } else {
        Position::Dismissed
    }
}

/// Resolve a released top offset onto a discrete position.
#[inline]
#[must_use]
pub fn position_for_offset(offset: f64, surface_height: f64, config: &CoverageConfig) -> Position {
    position_for_coverage(coverage_for_offset(offset, surface_height), config)
}
