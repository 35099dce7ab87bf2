//! Editor configuration.

use crate::guides::{GUIDE_VISIBILITY_THRESHOLD, SNAP_THRESHOLD};
use crate::history::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default canvas width: a simulated phone frame.
pub const DEFAULT_CANVAS_WIDTH: f64 = 375.0;

/// Default canvas height: a simulated phone frame.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 667.0;

/// Default key the design record is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "pagecraft-design";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Canvas size must be positive, got {width}x{height}")]
    CanvasSize { width: f64, height: f64 },
    #[error("{name} must be positive, got {value}")]
    Threshold { name: &'static str, value: f64 },
    #[error("Storage key must not be empty")]
    EmptyStorageKey,
}

/// Settings for an [`ElementStore`](crate::ElementStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Initial canvas width in pixels.
    pub canvas_width: f64,
    /// Initial canvas height in pixels.
    pub canvas_height: f64,
    /// Maximum number of undo states; 0 keeps everything.
    pub history_limit: usize,
    /// Distance within which a guide starts pulling a dragged element.
    pub snap_threshold: f64,
    /// Distance within which a guide is drawn at all.
    pub guide_visibility_threshold: f64,
    /// Key of the full design record.
    pub storage_key: String,
    /// Persist after every mutation when storage is attached.
    pub autosave: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            snap_threshold: SNAP_THRESHOLD,
            guide_visibility_threshold: GUIDE_VISIBILITY_THRESHOLD,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave: true,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::CanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        for (name, value) in [
            ("snapThreshold", self.snap_threshold),
            ("guideVisibilityThreshold", self.guide_visibility_threshold),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::Threshold { name, value });
            }
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }

    /// Key of the redundant element list.
    pub fn elements_key(&self) -> String {
        format!("{}-elements", self.storage_key)
    }

    /// Key of the redundant live-state map.
    pub fn element_states_key(&self) -> String {
        format!("{}-element-states", self.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.snap_threshold, 5.0);
        assert_eq!(config.guide_visibility_threshold, 15.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EditorConfig::from_json(r#"{"canvasWidth": 414, "autosave": false}"#).unwrap();
        assert_eq!(config.canvas_width, 414.0);
        assert_eq!(config.canvas_height, DEFAULT_CANVAS_HEIGHT);
        assert!(!config.autosave);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"canvasHeight": 0}"#),
            Err(ConfigError::CanvasSize { .. })
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"snapThreshold": -1}"#),
            Err(ConfigError::Threshold { name: "snapThreshold", .. })
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"storageKey": " "}"#),
            Err(ConfigError::EmptyStorageKey)
        ));
        assert!(matches!(EditorConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_derived_keys() {
        let config = EditorConfig::default();
        assert_eq!(config.elements_key(), "pagecraft-design-elements");
        assert_eq!(config.element_states_key(), "pagecraft-design-element-states");
    }
}
