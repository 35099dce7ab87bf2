//! Storage abstraction for persistence.
//!
//! The editor persists one design record after every mutation, plus the
//! element list and live-state map again under their own keys so a design can
//! be recovered when the main record is damaged.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::config::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, EditorConfig};
use crate::element::{Element, ElementId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key/value storage backends.
///
/// Backends hold string values under string keys, the way browser
/// `localStorage` does. Writes are synchronous and complete before returning.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Read the value under `key`, `None` if absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Trait for key/value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Read the value under `key`, `None` if absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Color scheme of the editor chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Canvas-wide settings that persist with a design but are not versioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignSettings {
    pub theme: Theme,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub is_preview_mode: bool,
}

impl DesignSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            theme: Theme::default(),
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            is_preview_mode: false,
        }
    }
}

fn default_canvas_width() -> f64 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> f64 {
    DEFAULT_CANVAS_HEIGHT
}

/// Everything persisted for one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRecord {
    pub elements: Vec<Element>,
    #[serde(default)]
    pub element_states: HashMap<ElementId, String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,
    #[serde(default)]
    pub is_preview_mode: bool,
}

impl DesignRecord {
    /// An empty design with the given settings.
    pub fn empty(settings: DesignSettings) -> Self {
        Self {
            elements: Vec::new(),
            element_states: HashMap::new(),
            theme: settings.theme,
            canvas_width: settings.canvas_width,
            canvas_height: settings.canvas_height,
            is_preview_mode: settings.is_preview_mode,
        }
    }

    pub fn settings(&self) -> DesignSettings {
        DesignSettings {
            theme: self.theme,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            is_preview_mode: self.is_preview_mode,
        }
    }

    /// Serialize the record to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a record from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Repair element layouts read back from storage.
    pub fn normalize(&mut self) {
        for element in &mut self.elements {
            element.properties.layout.normalize();
        }
    }
}

/// Write a design under its main key and the two recovery keys.
pub fn save_design(
    storage: &dyn Storage,
    config: &EditorConfig,
    record: &DesignRecord,
) -> StorageResult<()> {
    storage.set_item(&config.storage_key, &record.to_json()?)?;
    storage.set_item(&config.elements_key(), &serde_json::to_string(&record.elements)?)?;
    storage.set_item(
        &config.element_states_key(),
        &serde_json::to_string(&record.element_states)?,
    )?;
    Ok(())
}

/// Read back the saved design, if any.
///
/// Never fails: a missing or unreadable record means "no saved design".
/// When the main record is damaged, the separately stored element list and
/// live states are tried before giving up.
pub fn load_saved_design(storage: &dyn Storage, config: &EditorConfig) -> Option<DesignRecord> {
    let mut record = match read_record(storage, &config.storage_key) {
        Ok(Some(record)) => record,
        Ok(None) => {
            log::info!("No saved design under '{}'", config.storage_key);
            return None;
        }
        Err(e) => {
            log::error!("Failed to load saved design '{}': {}", config.storage_key, e);
            match recover_design(storage, config) {
                Ok(Some(record)) => {
                    log::info!("Recovered {} elements from backup keys", record.elements.len());
                    record
                }
                Ok(None) => return None,
                Err(e) => {
                    log::error!("Failed to recover design from backup keys: {}", e);
                    return None;
                }
            }
        }
    };
    record.normalize();
    Some(record)
}

fn read_record(storage: &dyn Storage, key: &str) -> StorageResult<Option<DesignRecord>> {
    match storage.get_item(key)? {
        Some(json) => Ok(Some(DesignRecord::from_json(&json)?)),
        None => Ok(None),
    }
}

fn recover_design(
    storage: &dyn Storage,
    config: &EditorConfig,
) -> StorageResult<Option<DesignRecord>> {
    let Some(elements_json) = storage.get_item(&config.elements_key())? else {
        return Ok(None);
    };
    let elements: Vec<Element> = serde_json::from_str(&elements_json)?;
    let element_states = match storage.get_item(&config.element_states_key())? {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable element states: {}", e);
            HashMap::new()
        }),
        None => HashMap::new(),
    };

    let mut record = DesignRecord::empty(DesignSettings::from_config(config));
    record.elements = elements;
    record.element_states = element_states;
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementProperties, Layout};

    fn sample_record() -> DesignRecord {
        let mut button = Element::new(ElementKind::Button, ElementProperties::default());
        button.properties.layout.set_position(12.0, 34.0);
        let input = Element::new(ElementKind::Input, ElementProperties::default());
        let mut record = DesignRecord::empty(DesignSettings::from_config(&EditorConfig::default()));
        record.element_states.insert(input.id(), "typed".to_string());
        record.elements = vec![button, input];
        record.theme = Theme::Dark;
        record
    }

    #[test]
    fn test_record_json_field_names() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert!(value.get("elementStates").is_some());
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["canvasWidth"], 375.0);
        assert_eq!(value["isPreviewMode"], false);
    }

    #[test]
    fn test_save_writes_all_keys() {
        let storage = MemoryStorage::new();
        let config = EditorConfig::default();
        let record = sample_record();
        save_design(&storage, &config, &record).unwrap();

        assert!(storage.get_item("pagecraft-design").unwrap().is_some());
        let elements_json = storage.get_item(&config.elements_key()).unwrap().unwrap();
        let elements: Vec<Element> = serde_json::from_str(&elements_json).unwrap();
        assert_eq!(elements, record.elements);
        let states_json = storage.get_item(&config.element_states_key()).unwrap().unwrap();
        let states: HashMap<ElementId, String> = serde_json::from_str(&states_json).unwrap();
        assert_eq!(states, record.element_states);
    }

    #[test]
    fn test_load_round_trip() {
        let storage = MemoryStorage::new();
        let config = EditorConfig::default();
        let record = sample_record();
        save_design(&storage, &config, &record).unwrap();

        let loaded = load_saved_design(&storage, &config).unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.elements.len(), 2);
        assert_eq!(loaded.elements[0].properties.layout.left.as_deref(), Some("12px"));
        assert_eq!(loaded.element_states, record.element_states);
    }

    #[test]
    fn test_load_missing_is_none() {
        let storage = MemoryStorage::new();
        assert!(load_saved_design(&storage, &EditorConfig::default()).is_none());
    }

    #[test]
    fn test_load_normalizes_layout() {
        let storage = MemoryStorage::new();
        let config = EditorConfig::default();
        let json = r#"{"elements":[{"id":"6f1c9c1e-3c1a-4a43-9d1b-1f2a3b4c5d6e","type":"text",
            "properties":{"text":"hi","layout":{"left":"7.0px","width":"100.50px"}}}]}"#;
        storage.set_item(&config.storage_key, json).unwrap();

        let loaded = load_saved_design(&storage, &config).unwrap();
        let layout = &loaded.elements[0].properties.layout;
        assert_eq!(
            layout,
            &Layout {
                left: Some("7px".to_string()),
                top: Some("50%".to_string()),
                transform: Some("translate(7px, 50%)".to_string()),
                width: Some("100.5px".to_string()),
                ..Layout::default()
            }
        );
        assert_eq!(loaded.canvas_width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(loaded.theme, Theme::Light);
    }

    #[test]
    fn test_corrupt_record_recovers_from_backup_keys() {
        let storage = MemoryStorage::new();
        let config = EditorConfig::default();
        let record = sample_record();
        save_design(&storage, &config, &record).unwrap();
        storage.set_item(&config.storage_key, "{not json").unwrap();

        let loaded = load_saved_design(&storage, &config).unwrap();
        assert_eq!(loaded.elements.len(), 2);
        assert_eq!(loaded.element_states, record.element_states);
        // Settings are not in the backup keys
        assert_eq!(loaded.theme, Theme::Light);
    }

    #[test]
    fn test_corrupt_everything_is_none() {
        let storage = MemoryStorage::new();
        let config = EditorConfig::default();
        storage.set_item(&config.storage_key, "garbage").unwrap();
        storage.set_item(&config.elements_key(), "also garbage").unwrap();
        assert!(load_saved_design(&storage, &config).is_none());
    }
}
