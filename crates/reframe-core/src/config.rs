//! Per-session editor configuration.
//!
//! The host hands this over once when a session opens, usually as a JS object
//! through the WASM bindings. Every field has a default, so an empty object is
//! a valid configuration.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::edit::OutputOptions;
use crate::error::ValidationError;

/// Tunables for history depth, zoom limits and export defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of entries on each of the undo and redo stacks.
    pub history_depth: usize,
    /// `maxScale = minScale * zoom_range`.
    pub zoom_range: f64,
    /// During a pinch the scale may dip to `minScale * rubber_band`.
    pub rubber_band: f64,
    /// Straighten angles are clamped to `[-limit, limit]` degrees.
    pub straighten_limit: f64,
    /// Output options a fresh or reset session starts with.
    pub default_output: OutputOptions,
    /// Resampling filter used by the pixel engine for rotate and resize.
    pub filter: FilterType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: 50,
            zoom_range: 5.0,
            rubber_band: 0.5,
            straighten_limit: 45.0,
            default_output: OutputOptions::default(),
            filter: FilterType::Lanczos3,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject NaN or infinite tunables before a session is built on them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let scalars = [
            ("zoom range", self.zoom_range),
            ("rubber band", self.rubber_band),
            ("straighten limit", self.straighten_limit),
        ];
        for (what, value) in scalars {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { what, value });
            }
        }
        Ok(())
    }

    /// Zoom limits for the interactive crop surface.
    pub fn surface_limits(&self) -> SurfaceLimits {
        SurfaceLimits {
            zoom_range: self.zoom_range,
            rubber_band: self.rubber_band,
        }
    }
}

/// Scale limits relative to the cover-fit scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceLimits {
    pub zoom_range: f64,
    pub rubber_band: f64,
}

impl Default for SurfaceLimits {
    fn default() -> Self {
        EditorConfig::default().surface_limits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::OutputFormat;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::new();
        assert_eq!(config.history_depth, 50);
        assert_eq!(config.zoom_range, 5.0);
        assert_eq!(config.rubber_band, 0.5);
        assert_eq!(config.straighten_limit, 45.0);
        assert_eq!(config.default_output.format, OutputFormat::Jpeg);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"historyDepth": 10, "defaultOutput": {"format": "png"}}"#)
                .unwrap();
        assert_eq!(config.history_depth, 10);
        assert_eq!(config.zoom_range, 5.0);
        assert_eq!(config.default_output.format, OutputFormat::Png);
        assert_eq!(config.default_output.quality, 0.9);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(EditorConfig::default().validate().is_ok());

        let config = EditorConfig {
            straighten_limit: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NonFinite {
                what: "straighten limit",
                ..
            })
        ));

        let config = EditorConfig {
            zoom_range: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
