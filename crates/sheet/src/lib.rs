#![forbid(unsafe_code)]

//! Draggable bottom sheet public facade.
//!
//! Re-exports the position model and resolver from `sheet-core` and the
//! stateful controller from `sheet-widgets`, plus a prelude for everyday
//! use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use sheet_core::animation::{AnimationConfig, Easing};
pub use sheet_core::config::{SheetConfig, SheetConfigError};
pub use sheet_core::gesture::{DragConfig, DragEvent, PointerEvent, VerticalDragRecognizer};
pub use sheet_core::position::{
    coverage_for_offset, offset_for_position, position_for_coverage, position_for_offset,
};
pub use sheet_core::{ConfigurationError, CoverageConfig, Position};

#[cfg(feature = "tracing-json")]
pub use sheet_core::logging::init_json_logging;

// --- Widget re-exports -----------------------------------------------------

pub use sheet_widgets::{
    PresentingSurface, Selection, Sheet, SheetAction, SheetHeader, SheetHost, SheetId, SheetPhase,
    SheetSnapshot, Subscription, SurfaceHandle,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error for sheet integrations.
#[derive(Debug)]
pub enum Error {
    /// API misuse or an invalid value.
    Configuration(ConfigurationError),
    /// A configuration document could not be loaded.
    Load(SheetConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Load(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<SheetConfigError> for Error {
    fn from(err: SheetConfigError) -> Self {
        Self::Load(err)
    }
}

/// Standard result type for sheet APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load a TOML config file and build an idle sheet from it.
#[cfg(feature = "config")]
pub fn sheet_from_toml_file<C>(content: C, path: impl AsRef<std::path::Path>) -> Result<Sheet<C>> {
    let config = SheetConfig::from_toml_file(path)?;
    let mut sheet = Sheet::new(content);
    sheet.apply_config(config)?;
    Ok(sheet)
}

pub mod prelude {
    pub use crate::{
        AnimationConfig, ConfigurationError, CoverageConfig, DragEvent, Error, Position,
        PresentingSurface, Result, Selection, Sheet, SheetAction, SheetConfig, SheetHeader,
        SheetHost, SheetPhase,
    };

    pub use crate::{core, widgets};
}

pub use sheet_core as core;
pub use sheet_widgets as widgets;
