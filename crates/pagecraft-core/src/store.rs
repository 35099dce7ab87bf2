//! The element store: canonical document, live state and selection.
//!
//! Every document mutation goes through [`ElementStore`]. Mutations that
//! change the element sequence record the previous sequence in the undo
//! history; operations addressed to an element that no longer exists are
//! silent no-ops. Callers observe changes by draining [`ElementStore::poll_events`].

use crate::config::EditorConfig;
use crate::element::{
    Element, ElementId, ElementKind, ElementProperties, GroupId, StateAcceptance, TableData,
};
use crate::guides::Guides;
use crate::history::History;
use crate::storage::{self, DesignRecord, DesignSettings, Storage, Theme};
use kurbo::Size;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A change observed by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// The element sequence changed through a mutation.
    ElementsChanged,
    /// An element's live state changed.
    StateChanged { id: ElementId },
    /// The selected element or group changed.
    SelectionChanged,
    /// Theme, canvas size or preview mode changed.
    SettingsChanged,
    /// The element sequence was replaced by undo or redo.
    HistoryRestored,
    /// A whole design was loaded.
    DesignLoaded,
}

/// What [`ElementStore::set_element_state`] did with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOutcome {
    /// No element with that id.
    Missing,
    /// Kept as live state only.
    RawStored,
    /// Parsed as a properties patch and merged.
    PropertiesMerged,
    /// Parsed as table data and swapped in.
    TableReplaced,
}

/// The canonical document and its history.
pub struct ElementStore {
    history: History<Vec<Element>>,
    element_states: HashMap<ElementId, String>,
    selected_element: Option<ElementId>,
    selected_group: Option<GroupId>,
    settings: DesignSettings,
    config: EditorConfig,
    storage: Option<Arc<dyn Storage>>,
    events: Vec<StoreEvent>,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl ElementStore {
    /// Create an empty store.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: History::new(Vec::new(), config.history_limit),
            element_states: HashMap::new(),
            selected_element: None,
            selected_group: None,
            settings: DesignSettings::from_config(&config),
            config,
            storage: None,
            events: Vec::new(),
        }
    }

    /// Create a store backed by `backend`, seeded from any saved design.
    ///
    /// An unreadable saved design is logged and ignored.
    pub fn restore(config: EditorConfig, backend: Arc<dyn Storage>) -> Self {
        let saved = storage::load_saved_design(backend.as_ref(), &config);
        let mut store = Self::new(config);
        if let Some(record) = saved {
            log::info!("Restored design with {} elements", record.elements.len());
            store.load_design(record);
        }
        store.storage = Some(backend);
        store
    }

    /// Attach a storage backend for autosave.
    pub fn attach_storage(&mut self, backend: Arc<dyn Storage>) {
        self.storage = Some(backend);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // --- Queries ---

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        self.history.present()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements().iter().find(|e| e.id == id)
    }

    /// Live state of an element, if any was set.
    pub fn element_state(&self, id: ElementId) -> Option<&str> {
        self.element_states.get(&id).map(String::as_str)
    }

    pub fn element_states(&self) -> &HashMap<ElementId, String> {
        &self.element_states
    }

    /// Elements carrying `group_id`, in z-order.
    pub fn elements_in_group(&self, group_id: GroupId) -> Vec<&Element> {
        self.elements()
            .iter()
            .filter(|e| e.group_id == Some(group_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    pub fn history(&self) -> &History<Vec<Element>> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn selected_element(&self) -> Option<ElementId> {
        self.selected_element
    }

    pub fn selected_group(&self) -> Option<GroupId> {
        self.selected_group
    }

    pub fn settings(&self) -> DesignSettings {
        self.settings
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.settings.canvas_width, self.settings.canvas_height)
    }

    /// Alignment guides for the current canvas and elements.
    pub fn guides(&self) -> Guides {
        Guides::compute(self.canvas_size(), self.elements())
    }

    /// Drain pending change events.
    pub fn poll_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Mutations ---

    /// Add an element of `kind` on top of the z-order.
    ///
    /// Kind defaults are built first and `overrides` merged over them.
    pub fn add_element(
        &mut self,
        kind: impl Into<ElementKind>,
        overrides: ElementProperties,
    ) -> ElementId {
        let element = Element::new(kind.into(), overrides);
        let id = element.id;
        log::debug!("Adding {} element {}", element.kind, id);

        let mut next = self.elements().to_vec();
        next.push(element);
        self.commit(next);
        id
    }

    /// Merge `patch` into an element's properties.
    /// Returns false (and records nothing) if the element does not exist.
    pub fn update_element(&mut self, id: ElementId, patch: ElementProperties) -> bool {
        self.modify(id, |element| element.properties.merge(patch))
    }

    /// Remove an element. Its live state is left behind, unreachable.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        if self.element(id).is_none() {
            return false;
        }
        let next: Vec<Element> = self
            .elements()
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(next);

        let group_emptied = self
            .selected_group
            .is_some_and(|group| self.elements_in_group(group).is_empty());
        if self.selected_element == Some(id) || group_emptied {
            let group = if group_emptied { None } else { self.selected_group };
            self.set_selection(None, group);
        }
        true
    }

    /// Move the element at `from` to index `to`, shifting the ones between.
    ///
    /// An out-of-range `from` is ignored; `to` is clamped to the last index.
    /// Moving an element onto its own index still records a history entry.
    pub fn move_element(&mut self, from: usize, to: usize) -> bool {
        let len = self.len();
        if from >= len {
            log::debug!("Ignoring move from index {} of {}", from, len);
            return false;
        }
        let to = to.min(len - 1);

        let mut next = self.elements().to_vec();
        let element = next.remove(from);
        next.insert(to, element);
        self.commit(next);
        true
    }

    /// Pin an element at an absolute pixel position.
    ///
    /// Width, height and alignment are preserved.
    pub fn update_position(&mut self, id: ElementId, x: f64, y: f64) -> bool {
        self.modify(id, |element| element.properties.layout.set_position(x, y))
    }

    /// Set an element's live state.
    ///
    /// Depending on the element kind the value may also be parsed: a JSON
    /// object is merged into the properties, or JSON table data replaces the
    /// table. A value that does not parse is kept as live state only.
    pub fn set_element_state(&mut self, id: ElementId, value: impl Into<String>) -> StateOutcome {
        let value = value.into();
        let Some(element) = self.element(id) else {
            log::debug!("Ignoring state for missing element {}", id);
            return StateOutcome::Missing;
        };

        let (outcome, patch) = match element.kind.state_acceptance() {
            StateAcceptance::RawText => (StateOutcome::RawStored, None),
            StateAcceptance::StructuredPatch => {
                match serde_json::from_str::<ElementProperties>(&value) {
                    Ok(patch) => (StateOutcome::PropertiesMerged, Some(patch)),
                    Err(e) => {
                        log::debug!("State for {} is not a properties patch: {}", id, e);
                        (StateOutcome::RawStored, None)
                    }
                }
            }
            StateAcceptance::TabularData => match serde_json::from_str::<TableData>(&value) {
                Ok(data) => {
                    let patch = ElementProperties {
                        data: Some(data),
                        ..ElementProperties::default()
                    };
                    (StateOutcome::TableReplaced, Some(patch))
                }
                Err(e) => {
                    log::debug!("State for {} is not table data: {}", id, e);
                    (StateOutcome::RawStored, None)
                }
            },
        };

        self.element_states.insert(id, value);
        self.events.push(StoreEvent::StateChanged { id });
        // A merged patch commits, and the commit saves the new state with it
        match patch {
            Some(patch) => {
                self.modify(id, |element| element.properties.merge(patch));
            }
            None => self.persist(),
        }
        outcome
    }

    /// Tag every listed element with one fresh group id.
    /// Returns `None` if none of the ids exist.
    pub fn group_elements(&mut self, ids: &[ElementId]) -> Option<GroupId> {
        if !self.elements().iter().any(|e| ids.contains(&e.id)) {
            return None;
        }
        let group_id = Uuid::new_v4();
        let next = self
            .elements()
            .iter()
            .cloned()
            .map(|mut e| {
                if ids.contains(&e.id) {
                    e.group_id = Some(group_id);
                }
                e
            })
            .collect();
        self.commit(next);
        Some(group_id)
    }

    /// Clear `group_id` from every element carrying it.
    pub fn ungroup_elements(&mut self, group_id: GroupId) -> bool {
        if !self.elements().iter().any(|e| e.group_id == Some(group_id)) {
            return false;
        }
        let next = self
            .elements()
            .iter()
            .cloned()
            .map(|mut e| {
                if e.group_id == Some(group_id) {
                    e.group_id = None;
                }
                e
            })
            .collect();
        self.commit(next);

        if self.selected_group == Some(group_id) {
            self.selected_group = None;
            self.events.push(StoreEvent::SelectionChanged);
        }
        true
    }

    /// Copy an element under a fresh id on top of the z-order.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let copy = self.element(id)?.duplicate();
        let copy_id = copy.id;
        let mut next = self.elements().to_vec();
        next.push(copy);
        self.commit(next);
        Some(copy_id)
    }

    /// Remove every element.
    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.commit(Vec::new());
        self.set_selection(None, None);
        true
    }

    /// Undo the last change. Returns false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.after_restore();
        true
    }

    /// Redo the last undone change. Returns false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.after_restore();
        true
    }

    /// Replace the whole design and start a fresh history.
    pub fn load_design(&mut self, record: DesignRecord) {
        self.settings = record.settings();
        self.element_states = record.element_states;
        self.history.reset(record.elements);
        self.selected_element = None;
        self.selected_group = None;
        self.events.push(StoreEvent::DesignLoaded);
    }

    /// Snapshot everything that persists.
    pub fn to_record(&self) -> DesignRecord {
        let mut record = DesignRecord::empty(self.settings);
        record.elements = self.elements().to_vec();
        record.element_states = self.element_states.clone();
        record
    }

    /// Serialize the design to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.to_record().to_json()
    }

    // --- Selection ---

    /// Select an element, and its group if it has one.
    /// Selecting a missing element clears the selection.
    pub fn select_element(&mut self, id: ElementId) {
        match self.element(id) {
            Some(element) => {
                let group = element.group_id;
                self.set_selection(Some(id), group);
            }
            None => self.set_selection(None, None),
        }
    }

    /// Select a whole group.
    pub fn select_group(&mut self, group_id: GroupId) {
        let first = self
            .elements()
            .iter()
            .find(|e| e.group_id == Some(group_id))
            .map(|e| e.id);
        match first {
            Some(id) => self.set_selection(Some(id), Some(group_id)),
            None => self.set_selection(None, None),
        }
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None, None);
    }

    // --- Settings ---

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring invalid canvas size {}x{}", width, height);
            return;
        }
        self.settings.canvas_width = width;
        self.settings.canvas_height = height;
        self.settings_changed();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.settings_changed();
    }

    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.settings.is_preview_mode = enabled;
        self.settings_changed();
    }

    pub fn toggle_preview_mode(&mut self) -> bool {
        self.set_preview_mode(!self.settings.is_preview_mode);
        self.settings.is_preview_mode
    }

    // --- Internals ---

    /// Apply `f` to a copy of one element and commit. No-op if missing.
    fn modify(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) -> bool {
        let Some(index) = self.elements().iter().position(|e| e.id == id) else {
            log::debug!("Ignoring update for missing element {}", id);
            return false;
        };
        let mut next = self.elements().to_vec();
        f(&mut next[index]);
        self.commit(next);
        true
    }

    fn commit(&mut self, next: Vec<Element>) {
        self.history.commit(next);
        self.events.push(StoreEvent::ElementsChanged);
        self.persist();
    }

    fn after_restore(&mut self) {
        if let Some(id) = self.selected_element {
            if self.element(id).is_none() {
                self.set_selection(None, None);
            }
        }
        self.events.push(StoreEvent::HistoryRestored);
        self.persist();
    }

    fn set_selection(&mut self, element: Option<ElementId>, group: Option<GroupId>) {
        if self.selected_element == element && self.selected_group == group {
            return;
        }
        self.selected_element = element;
        self.selected_group = group;
        self.events.push(StoreEvent::SelectionChanged);
    }

    fn settings_changed(&mut self) {
        self.events.push(StoreEvent::SettingsChanged);
        self.persist();
    }

    /// Save the design if autosave is on. Failures are logged, never returned.
    fn persist(&self) {
        if !self.config.autosave {
            return;
        }
        let Some(backend) = &self.storage else {
            return;
        };
        if let Err(e) = storage::save_design(backend.as_ref(), &self.config, &self.to_record()) {
            log::warn!("Failed to save design: {}", e);
        }
    }
}
