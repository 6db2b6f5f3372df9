use crate::error::ConfigError;
use crate::geometry::limits::{MAX_AREA_SQ_M, MIN_AREA_SQ_M};
use crate::geometry::polygon::AreaBounds;
use serde::{Deserialize, Serialize};

/// Editor tuning. Every field has a default so hosts can pass a partial JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EditorConfig {
    /// Minimum spacing between preview refreshes; 100 ms caps them at 10/s.
    pub preview_interval_ms: f64,
    /// A second Escape inside this window clears the whole draft.
    pub double_escape_window_ms: f64,
    pub min_area_sq_meters: f64,
    pub max_area_sq_meters: f64,
    /// Radius around a control point that starts a drag.
    pub pick_tolerance_meters: f64,
    /// Refuse to finish a draft that `validate()` flags.
    pub require_valid_boundary: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            preview_interval_ms: 100.0,
            double_escape_window_ms: 500.0,
            min_area_sq_meters: MIN_AREA_SQ_M,
            max_area_sq_meters: MAX_AREA_SQ_M,
            pick_tolerance_meters: 3.0,
            require_valid_boundary: false,
        }
    }
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<EditorConfig, ConfigError> {
        let cfg: EditorConfig = serde_json::from_str(text)?;
        cfg.checked()
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<EditorConfig, ConfigError> {
        let cfg: EditorConfig = serde_json::from_value(v)?;
        cfg.checked()
    }

    pub fn area_bounds(&self) -> AreaBounds {
        AreaBounds { min: self.min_area_sq_meters, max: self.max_area_sq_meters }
    }

    /// Rejects negative or non-finite timings and inverted area bounds.
    pub fn checked(self) -> Result<EditorConfig, ConfigError> {
        let non_negative = [
            ("previewIntervalMs", self.preview_interval_ms),
            ("doubleEscapeWindowMs", self.double_escape_window_ms),
            ("minAreaSqMeters", self.min_area_sq_meters),
            ("pickToleranceMeters", self.pick_tolerance_meters),
        ];
        for (field, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::Invalid { field, reason: format!("must be a finite non-negative number, got {}", v) });
            }
        }
        if !self.max_area_sq_meters.is_finite() || self.max_area_sq_meters < self.min_area_sq_meters {
            return Err(ConfigError::Invalid {
                field: "maxAreaSqMeters",
                reason: format!("must be finite and at least minAreaSqMeters ({})", self.min_area_sq_meters),
            });
        }
        Ok(self)
    }
}
