//! Editor settings
//!
//! Thresholds and toggles consumed by the drawing tools and the selection
//! engine. Settings are plain data owned by the host; tools read them through
//! the host context on every event and never cache them across gestures.
//!
//! Distances suffixed `_px` are device pixels, everything else is in logical
//! map units.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};

/// Editor settings shared by every tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shapes whose bounds are narrower or shorter than this are discarded.
    pub min_shape_size: f64,
    /// Edge length of the square emitted by the point tool.
    pub point_size: f64,
    /// Drags shorter than this in both axes resolve to a point pick.
    pub pick_threshold_px: f64,
    /// Edge length of a resize handle hot zone.
    pub handle_size_px: f64,
    /// Distance of the rotate handle above the selection's top edge.
    pub rotate_handle_offset_px: f64,
    /// Hit-test tolerance for point picks.
    pub hit_tolerance_px: f64,
    /// Lower zoom clamp for the zoom tool.
    pub zoom_min: f64,
    /// Upper zoom clamp for the zoom tool.
    pub zoom_max: f64,
    /// Nudge distance of a single arrow key press.
    pub nudge_step: f64,
    /// Nudge distance per auto-repeat tick while an arrow key is held.
    pub nudge_repeat_step: f64,
    /// Whether drawing tools snap to the overlay by default.
    pub snap_enabled: bool,
    /// Angle increment used when rotating with the lock modifier.
    pub rotate_snap_degrees: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_shape_size: 5.0,
            point_size: 5.0,
            pick_threshold_px: 10.0,
            handle_size_px: 8.0,
            rotate_handle_offset_px: 20.0,
            hit_tolerance_px: 3.0,
            zoom_min: 0.25,
            zoom_max: 4.0,
            nudge_step: 1.0,
            nudge_repeat_step: 10.0,
            snap_enabled: false,
            rotate_snap_degrees: 15.0,
        }
    }
}

impl Settings {
    /// Parses settings from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every threshold is usable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("min_shape_size", self.min_shape_size),
            ("point_size", self.point_size),
            ("pick_threshold_px", self.pick_threshold_px),
            ("handle_size_px", self.handle_size_px),
            ("zoom_min", self.zoom_min),
            ("zoom_max", self.zoom_max),
            ("nudge_step", self.nudge_step),
            ("nudge_repeat_step", self.nudge_repeat_step),
            ("rotate_snap_degrees", self.rotate_snap_degrees),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                tracing::warn!("Rejecting setting {} = {}", name, value);
                return Err(SettingsError::InvalidValue {
                    setting: name.to_string(),
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }
        if self.zoom_min > self.zoom_max {
            return Err(SettingsError::InvalidValue {
                setting: "zoom_min".to_string(),
                reason: format!("{} exceeds zoom_max {}", self.zoom_min, self.zoom_max),
            });
        }
        if !self.hit_tolerance_px.is_finite() || self.hit_tolerance_px < 0.0 {
            return Err(SettingsError::InvalidValue {
                setting: "hit_tolerance_px".to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}
