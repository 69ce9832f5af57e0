#![forbid(unsafe_code)]

//! Tunable parameters for the paper-fold surface.
//!
//! Every constant the orchestrator and gesture session use lives in one
//! [`FoldConfig`] that can be loaded from TOML or JSON when the `config`
//! feature is on.
//!
//! # Loading
//!
//! ```toml
//! edge_scroll_width = 40.0
//! tick_interval_ms = 10
//!
//! [thresholds]
//! left = 0.3
//! right = 0.3
//! top = 0.3
//! bottom = 0.3
//!
//! [restore]
//! divisor = 4.0
//! tolerance = 5.0
//! ```
//!
//! ```rust,ignore
//! let config = FoldConfig::from_toml_file("paperfold.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `FoldConfig::default()` reproduces the built-in behavior: 0.3 release
//! thresholds, a 40-point edge zone, a 10 ms tick, divisor 4 on every edge
//! with a 2-point tolerance on the left and 5 points elsewhere.

#[cfg(feature = "config")]
use std::path::Path;

use fold_core::animation::EasingProfile;
use fold_core::fold_state::{Edge, PerEdge};
use fold_core::transform::DEFAULT_EYE_DISTANCE;
use fold_render::CaptureQuality;
use web_time::Duration;

use crate::ticker::{DEFAULT_TICK_INTERVAL, MIN_INTERVAL};

/// Default fraction of an edge's extent a release must pass to open it.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Default width of the side-margin zone that forces a horizontal drag.
pub const DEFAULT_EDGE_SCROLL_WIDTH: f64 = 40.0;

/// Default easing divisor, shared by every edge.
pub const DEFAULT_EASING_DIVISOR: f64 = 4.0;

// ---------------------------------------------------------------------------
// FoldConfig
// ---------------------------------------------------------------------------

/// All tunables for one paper-fold surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FoldConfig {
    /// Side-margin width (points) that locks a drag horizontally.
    pub edge_scroll_width: f64,

    /// Animation tick interval in milliseconds.
    pub tick_interval_ms: u64,

    /// Snapshot resolution for panel tiles.
    pub capture_quality: CaptureQuality,

    /// Perspective eye distance for hinge panels.
    pub perspective_distance: f64,

    /// Start with side-margin horizontal locking enabled.
    pub horizontal_edge_dragging: bool,

    /// Release thresholds as a fraction of each edge's extent.
    pub thresholds: ThresholdConfig,

    /// Easing used when settling onto each edge.
    pub easing: EasingConfig,

    /// Easing used when restoring to the centre.
    pub restore: EasingProfile,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            edge_scroll_width: DEFAULT_EDGE_SCROLL_WIDTH,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            capture_quality: CaptureQuality::Optimized,
            perspective_distance: DEFAULT_EYE_DISTANCE,
            horizontal_edge_dragging: false,
            thresholds: ThresholdConfig::default(),
            easing: EasingConfig::default(),
            restore: EasingProfile::new(DEFAULT_EASING_DIVISOR, 5.0),
        }
    }
}

impl FoldConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, FoldConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, FoldConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, FoldConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FoldConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, FoldConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check every parameter is in range.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for edge in Edge::ALL {
            let name = edge_name(edge);
            let threshold = self.thresholds.get(edge);
            if !(0.0..=1.0).contains(&threshold) {
                errors.push(format!("thresholds.{name} must be in [0, 1], got {threshold}"));
            }
            check_profile(&mut errors, &format!("easing.{name}"), self.easing.get(edge));
        }
        check_profile(&mut errors, "restore", self.restore);

        if self.edge_scroll_width.is_nan() || self.edge_scroll_width < 0.0 {
            errors.push(format!(
                "edge_scroll_width must be >= 0, got {}",
                self.edge_scroll_width
            ));
        }
        if self.tick_interval_ms == 0 {
            errors.push("tick_interval_ms must be > 0".into());
        }
        if self.perspective_distance.is_nan() || self.perspective_distance <= 0.0 {
            errors.push(format!(
                "perspective_distance must be > 0, got {}",
                self.perspective_distance
            ));
        }

        errors
    }

    /// Return `self` if valid, otherwise every problem found.
    pub fn validated(self) -> Result<Self, FoldConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(FoldConfigError::Validation(errors))
        }
    }

    /// Tick interval as a duration (at least [`MIN_INTERVAL`]).
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms).max(MIN_INTERVAL)
    }

    /// Easing profile for settling onto `edge`.
    #[must_use]
    pub fn easing_for(&self, edge: Edge) -> EasingProfile {
        self.easing.get(edge)
    }
}

fn edge_name(edge: Edge) -> &'static str {
    match edge {
        Edge::Left => "left",
        Edge::Right => "right",
        Edge::Top => "top",
        Edge::Bottom => "bottom",
    }
}

fn check_profile(errors: &mut Vec<String>, name: &str, profile: EasingProfile) {
    if profile.divisor.is_nan() || profile.divisor < 1.0 {
        errors.push(format!("{name}.divisor must be >= 1, got {}", profile.divisor));
    }
    if profile.tolerance.is_nan() || profile.tolerance <= 0.0 {
        errors.push(format!("{name}.tolerance must be > 0, got {}", profile.tolerance));
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// `[thresholds]`: release thresholds per edge.
///
/// Keys left out of the section keep [`DEFAULT_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ThresholdConfig {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            left: DEFAULT_THRESHOLD,
            right: DEFAULT_THRESHOLD,
            top: DEFAULT_THRESHOLD,
            bottom: DEFAULT_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    #[must_use]
    pub fn get(&self, edge: Edge) -> f64 {
        self.per_edge().get(edge)
    }

    /// The thresholds in the shape the gesture session reads.
    #[must_use]
    pub fn per_edge(&self) -> PerEdge<f64> {
        PerEdge {
            left: self.left,
            right: self.right,
            top: self.top,
            bottom: self.bottom,
        }
    }
}

/// `[easing.<edge>]`: settle easing per edge.
///
/// A missing edge keeps its built-in profile. A partially written profile
/// fills the missing key from [`EasingProfile::default`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct EasingConfig {
    pub left: EasingProfile,
    pub right: EasingProfile,
    pub top: EasingProfile,
    pub bottom: EasingProfile,
}

impl Default for EasingConfig {
    fn default() -> Self {
        Self {
            left: EasingProfile::new(DEFAULT_EASING_DIVISOR, 2.0),
            right: EasingProfile::new(DEFAULT_EASING_DIVISOR, 5.0),
            top: EasingProfile::new(DEFAULT_EASING_DIVISOR, 5.0),
            bottom: EasingProfile::new(DEFAULT_EASING_DIVISOR, 5.0),
        }
    }
}

impl EasingConfig {
    #[must_use]
    pub fn get(&self, edge: Edge) -> EasingProfile {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`FoldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum FoldConfigError {
    #[cfg(feature = "config")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = FoldConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
        assert_eq!(config.easing_for(Edge::Left).tolerance, 2.0);
        assert_eq!(config.easing_for(Edge::Bottom).divisor, 4.0);
    }

    #[test]
    fn every_problem_reported() {
        let mut config = FoldConfig::default();
        config.thresholds.right = 1.5;
        config.restore.divisor = 0.5;
        config.tick_interval_ms = 0;
        config.perspective_distance = f64::NAN;
        let errors = config.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors[0].starts_with("thresholds.right"));
    }

    #[test]
    fn sections_default_to_built_in_values() {
        let config = FoldConfig::default();
        assert_eq!(config.thresholds.per_edge(), PerEdge::splat(DEFAULT_THRESHOLD));
        assert_eq!(config.easing.get(Edge::Top), EasingProfile::new(4.0, 5.0));
        assert_eq!(config.restore, EasingProfile::default());
    }

    #[test]
    fn validated_wraps_errors() {
        let mut config = FoldConfig::default();
        config.edge_scroll_width = -1.0;
        let err = config.validated().expect_err("invalid");
        assert!(err.to_string().contains("edge_scroll_width"));
    }
}
