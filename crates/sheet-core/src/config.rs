#![forbid(unsafe_code)]

//! Grouped sheet configuration, optionally loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # sheet.toml
//! initial_position = "expanded"
//!
//! [coverage]
//! collapsed = 0.4
//! expanded = 0.95
//!
//! [animation]
//! duration = 0.35
//! easing = "ease_out"
//! ```
//!
//! ```rust,ignore
//! let config = SheetConfig::from_toml_file("sheet.toml")?;
//! let config = SheetConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the built-in values, so a partial file only
//! overrides what it names. Coverage is validated while deserializing; the
//! remaining checks run in [`SheetConfig::validate`] before a loader returns.

#[cfg(feature = "config")]
use std::path::Path;

use crate::animation::AnimationConfig;
use crate::error::ConfigurationError;
use crate::position::{CoverageConfig, Position};

/// Every tunable of a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SheetConfig {
    /// Position the sheet settles into when presented.
    pub initial_position: Position,
    /// Coverage anchors for collapsed and expanded.
    pub coverage: CoverageConfig,
    /// Settle animation timing.
    pub animation: AnimationConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            initial_position: Position::Collapsed,
            coverage: CoverageConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl SheetConfig {
    /// Collect every validation problem.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigurationError> {
        let mut errors = Vec::new();
        if !self.initial_position.is_presentable() {
            errors.push(ConfigurationError::DismissedInitialPosition);
        }
        // Rebuilding catches values that bypassed the constructor.
        if let Err(err) =
            CoverageConfig::new(self.coverage.collapsed(), self.coverage.expanded())
        {
            errors.push(err);
        }
        if let Err(err) = self.animation.validate() {
            errors.push(err);
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, SheetConfigError> {
        let config: Self = toml::from_str(s).map_err(SheetConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SheetConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SheetConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, SheetConfigError> {
        let config: Self = serde_json::from_str(s).map_err(SheetConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SheetConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SheetConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a single-line JSON document.
    #[cfg(feature = "config")]
    pub fn to_json(&self) -> Result<String, SheetConfigError> {
        serde_json::to_string(self).map_err(SheetConfigError::Json)
    }

    #[cfg(feature = "config")]
    fn checked(self) -> Result<Self, SheetConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SheetConfigError::Invalid(errors))
        }
    }
}

/// Errors that can occur when loading a sheet configuration.
#[derive(Debug)]
pub enum SheetConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse or encode error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// The document parsed but describes an invalid configuration.
    Invalid(Vec<ConfigurationError>),
}

impl std::fmt::Display for SheetConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Invalid(errors) => {
                let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "invalid sheet config: {}", joined.join("; "))
            }
        }
    }
}

impl std::error::Error for SheetConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        assert!(SheetConfig::default().validate().is_empty());
    }

    #[test]
    fn default_matches_component_defaults() {
        let config = SheetConfig::default();
        assert_eq!(config.initial_position, Position::Collapsed);
        assert_eq!(config.coverage, CoverageConfig::default());
        assert_eq!(config.animation, AnimationConfig::default());
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = SheetConfig::default();
        config.initial_position = Position::Dismissed;
        config.animation.damping = 4.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors.contains(&ConfigurationError::DismissedInitialPosition));
    }

    #[test]
    fn invalid_error_displays_every_problem() {
        let err = SheetConfigError::Invalid(vec![
            ConfigurationError::DismissedInitialPosition,
            ConfigurationError::NotPresented,
        ]);
        let msg = err.to_string();
        assert!(msg.contains("initial position"), "{msg}");
        assert!(msg.contains("presenting surface"), "{msg}");
    }

    #[cfg(feature = "config")]
    mod loading {
        use super::*;
        use crate::animation::Easing;
        use std::time::Duration;

        #[test]
        fn partial_toml_keeps_defaults() {
            let config = SheetConfig::from_toml_str(
                r#"
                initial_position = "expanded"

                [animation]
                duration = 0.25
                "#,
            )
            .expect("valid toml");
            assert_eq!(config.initial_position, Position::Expanded);
            assert_eq!(config.animation.duration, Duration::from_millis(250));
            assert_eq!(config.animation.damping, 0.8);
            assert_eq!(config.coverage, CoverageConfig::default());
        }

        #[test]
        fn toml_coverage_and_easing() {
            let config = SheetConfig::from_toml_str(
                r#"
                [coverage]
                collapsed = 0.4
                expanded = 0.95

                [animation]
                easing = "ease_out"
                "#,
            )
            .expect("valid toml");
            assert_eq!(config.coverage.collapsed(), 0.4);
            assert_eq!(config.coverage.expanded(), 0.95);
            assert_eq!(config.animation.easing, Easing::EaseOut);
        }

        #[test]
        fn toml_rejects_inverted_coverage() {
            let err = SheetConfig::from_toml_str(
                r#"
                [coverage]
                collapsed = 0.9
                expanded = 0.5
                "#,
            )
            .expect_err("inverted coverage must fail");
            assert!(matches!(err, SheetConfigError::Toml(_)), "{err}");
        }

        #[test]
        fn toml_rejects_dismissed_initial_position() {
            let err = SheetConfig::from_toml_str(r#"initial_position = "dismissed""#)
                .expect_err("dismissed must fail");
            match err {
                SheetConfigError::Invalid(errors) => {
                    assert_eq!(errors, vec![ConfigurationError::DismissedInitialPosition]);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn json_round_trip_preserves_values() {
            let mut config = SheetConfig::default();
            config.initial_position = Position::Expanded;
            config.coverage = CoverageConfig::new(0.3, 0.7).expect("valid coverage");
            let json = config.to_json().expect("encode");
            let back = SheetConfig::from_json_str(&json).expect("decode");
            assert_eq!(back, config);
        }

        #[test]
        fn json_rejects_negative_duration() {
            let err = SheetConfig::from_json_str(r#"{"animation": {"duration": -1.0}}"#)
                .expect_err("negative duration must fail");
            assert!(matches!(err, SheetConfigError::Json(_)), "{err}");
        }

        #[test]
        fn file_loading_reports_io_errors() {
            let dir = tempfile::tempdir().expect("tempdir");
            let missing = dir.path().join("missing.toml");
            let err = SheetConfig::from_toml_file(&missing).expect_err("missing file");
            assert!(matches!(err, SheetConfigError::Io(_)));

            let path = dir.path().join("sheet.toml");
            std::fs::write(&path, "initial_position = \"collapsed\"\n").expect("write");
            let config = SheetConfig::from_toml_file(&path).expect("load");
            assert_eq!(config.initial_position, Position::Collapsed);
        }
    }
}
