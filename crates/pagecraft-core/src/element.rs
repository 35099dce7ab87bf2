//! Element definitions for the page canvas.
//!
//! An [`Element`] is one placeable widget. Its kind is fixed at creation and
//! decides the defaults it starts with and how it accepts live state. The
//! per-kind behavior lives in a lookup table ([`KIND_SPECS`]) so that a new
//! widget kind is a new table row rather than new branching code.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// Shared tag linking elements that move and select together.
pub type GroupId = Uuid;

/// How an element kind interprets a live-state string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAcceptance {
    /// The value may be a JSON object merged into the element's properties.
    StructuredPatch,
    /// The value may be JSON table data replacing the element's `data`.
    TabularData,
    /// The value is plain text and is never parsed.
    RawText,
}

/// Default style values for a kind.
#[derive(Debug, Clone, Copy)]
pub struct StyleDefaults {
    pub background_color: Option<&'static str>,
    pub color: Option<&'static str>,
    pub padding: Option<&'static str>,
    pub border_radius: Option<&'static str>,
    pub font_size: Option<&'static str>,
}

/// Static description of one element kind.
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    /// Wire name of the kind.
    pub name: &'static str,
    /// Default display text.
    pub default_text: &'static str,
    /// Default layout width.
    pub width: &'static str,
    /// Default layout height.
    pub height: &'static str,
    pub style: StyleDefaults,
    /// Additional content fields seeded on creation.
    pub content: &'static [(&'static str, &'static str)],
    pub state: StateAcceptance,
}

/// The closed set of element kinds known to the editor.
pub const KIND_SPECS: &[KindSpec] = &[
    KindSpec {
        name: "button",
        default_text: "Click me",
        width: "fit-content",
        height: "auto",
        style: StyleDefaults {
            background_color: Some("#3B82F6"),
            color: Some("#FFFFFF"),
            padding: Some("8px 16px"),
            border_radius: Some("4px"),
            font_size: Some("14px"),
        },
        content: &[("message", "Button clicked!")],
        state: StateAcceptance::StructuredPatch,
    },
    KindSpec {
        name: "text",
        default_text: "Text",
        width: "auto",
        height: "auto",
        style: StyleDefaults {
            background_color: None,
            color: Some("#000000"),
            padding: None,
            border_radius: None,
            font_size: Some("16px"),
        },
        content: &[],
        state: StateAcceptance::RawText,
    },
    KindSpec {
        name: "input",
        default_text: "",
        width: "200px",
        height: "auto",
        style: StyleDefaults {
            background_color: Some("#FFFFFF"),
            color: Some("#000000"),
            padding: Some("8px"),
            border_radius: Some("4px"),
            font_size: Some("14px"),
        },
        content: &[("placeholder", "Enter text...")],
        state: StateAcceptance::RawText,
    },
    KindSpec {
        name: "table",
        default_text: "Table",
        width: "400px",
        height: "auto",
        style: StyleDefaults {
            background_color: Some("#FFFFFF"),
            color: Some("#000000"),
            padding: Some("8px"),
            border_radius: None,
            font_size: Some("14px"),
        },
        content: &[],
        state: StateAcceptance::TabularData,
    },
    KindSpec {
        name: "container",
        default_text: "Container",
        width: "400px",
        height: "300px",
        style: StyleDefaults {
            background_color: Some("#F3F4F6"),
            color: None,
            padding: Some("16px"),
            border_radius: Some("8px"),
            font_size: None,
        },
        content: &[],
        state: StateAcceptance::StructuredPatch,
    },
    KindSpec {
        name: "image",
        default_text: "Image",
        width: "200px",
        height: "200px",
        style: StyleDefaults {
            background_color: None,
            color: None,
            padding: None,
            border_radius: Some("4px"),
            font_size: None,
        },
        content: &[("src", "https://placehold.co/200x200"), ("alt", "Image")],
        state: StateAcceptance::StructuredPatch,
    },
    KindSpec {
        name: "card",
        default_text: "Card",
        width: "300px",
        height: "auto",
        style: StyleDefaults {
            background_color: Some("#FFFFFF"),
            color: Some("#000000"),
            padding: Some("16px"),
            border_radius: Some("8px"),
            font_size: None,
        },
        content: &[("title", "Card Title"), ("description", "Card description")],
        state: StateAcceptance::StructuredPatch,
    },
];

/// The kind of an element.
///
/// Unrecognized kind names are preserved in [`ElementKind::Other`] so that a
/// saved design from a newer editor survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Button,
    Text,
    Input,
    Table,
    Container,
    Image,
    Card,
    Other(String),
}

impl ElementKind {
    /// The wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Button => "button",
            ElementKind::Text => "text",
            ElementKind::Input => "input",
            ElementKind::Table => "table",
            ElementKind::Container => "container",
            ElementKind::Image => "image",
            ElementKind::Card => "card",
            ElementKind::Other(name) => name,
        }
    }

    /// Look up the static spec for this kind, if it is a known kind.
    pub fn spec(&self) -> Option<&'static KindSpec> {
        let name = self.as_str();
        KIND_SPECS.iter().find(|spec| spec.name == name)
    }

    /// How this kind accepts live state. Unknown kinds accept structured patches.
    pub fn state_acceptance(&self) -> StateAcceptance {
        self.spec()
            .map(|spec| spec.state)
            .unwrap_or(StateAcceptance::StructuredPatch)
    }
}

impl From<&str> for ElementKind {
    fn from(name: &str) -> Self {
        match name {
            "button" => ElementKind::Button,
            "text" => ElementKind::Text,
            "input" => ElementKind::Input,
            "table" => ElementKind::Table,
            "container" => ElementKind::Container,
            "image" => ElementKind::Image,
            "card" => ElementKind::Card,
            other => ElementKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ElementKind {
    fn from(name: String) -> Self {
        ElementKind::from(name.as_str())
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tabular content of a table element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// The two-column starter table.
    pub fn starter() -> Self {
        Self {
            headers: vec!["Header 1".to_string(), "Header 2".to_string()],
            rows: vec![
                vec!["Cell 1".to_string(), "Cell 2".to_string()],
                vec!["Cell 3".to_string(), "Cell 4".to_string()],
            ],
        }
    }
}

/// Copy every `Some` field of `$patch` onto `$target`.
macro_rules! merge_fields {
    ($target:expr, $patch:ident; $($field:ident),+ $(,)?) => {
        $(
            if $patch.$field.is_some() {
                $target.$field = $patch.$field;
            }
        )+
    };
}

/// Visual attributes of an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    /// Background of the click-feedback message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_background_color: Option<String>,
    /// Text color of the click-feedback message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_text_color: Option<String>,
}

impl Style {
    /// Build the default style for a kind.
    fn from_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            background_color: defaults.background_color.map(str::to_string),
            color: defaults.color.map(str::to_string),
            padding: defaults.padding.map(str::to_string),
            border_radius: defaults.border_radius.map(str::to_string),
            font_size: defaults.font_size.map(str::to_string),
            ..Self::default()
        }
    }

    /// Merge a patch key-by-key; absent keys keep their current value.
    pub fn merge(&mut self, patch: Style) {
        merge_fields!(self, patch;
            background_color, color, padding, border_radius, font_size, font_weight,
            opacity, visibility, border_style, border_width, border_color,
            text_align, text_decoration, message_background_color, message_text_color,
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Positioning attributes of an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl Layout {
    /// Merge a patch key-by-key; absent keys keep their current value.
    pub fn merge(&mut self, patch: Layout) {
        merge_fields!(self, patch;
            position, left, top, transform, width, height, align, z_index,
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Place the element at an absolute pixel offset.
    pub fn set_position(&mut self, x: f64, y: f64) {
        let left = format_px(x);
        let top = format_px(y);
        self.transform = Some(format!("translate({left}, {top})"));
        self.left = Some(left);
        self.top = Some(top);
        self.position = Some("absolute".to_string());
    }

    /// Left offset in pixels; unset or non-pixel values count as 0.
    pub fn left_px(&self) -> f64 {
        px_or_zero(self.left.as_deref())
    }

    /// Top offset in pixels; unset or non-pixel values count as 0.
    pub fn top_px(&self) -> f64 {
        px_or_zero(self.top.as_deref())
    }

    /// Width in pixels; `auto`, `fit-content` and percentages count as 0.
    pub fn width_px(&self) -> f64 {
        px_or_zero(self.width.as_deref())
    }

    /// Height in pixels; `auto` and percentages count as 0.
    pub fn height_px(&self) -> f64 {
        px_or_zero(self.height.as_deref())
    }

    /// Repair a layout read back from storage.
    ///
    /// Missing offsets default to `50%`, pixel strings are rewritten in
    /// canonical `<n>px` form, and a transform is synthesized from the
    /// offsets when none was saved.
    pub fn normalize(&mut self) {
        for value in [&mut self.left, &mut self.top, &mut self.width, &mut self.height] {
            if let Some(canonical) = value.as_deref().and_then(canonical_px) {
                *value = Some(canonical);
            }
        }
        let left = self.left.get_or_insert_with(|| "50%".to_string()).clone();
        let top = self.top.get_or_insert_with(|| "50%".to_string()).clone();
        if self.transform.is_none() {
            self.transform = Some(format!("translate({left}, {top})"));
        }
    }
}

/// The property bag of an element.
///
/// Known content fields are typed; anything else is kept in `extra` so it
/// survives patches and storage round trips untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Feedback message shown when a button is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TableData>,
    #[serde(skip_serializing_if = "Style::is_empty")]
    pub style: Style,
    #[serde(skip_serializing_if = "Layout::is_empty")]
    pub layout: Layout,
    /// Unrecognized fields, kept verbatim. A button's click action lands
    /// here as inert data and is never evaluated.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementProperties {
    /// Build the default properties for a kind.
    pub fn defaults_for(kind: &ElementKind) -> Self {
        let Some(spec) = kind.spec() else {
            return Self {
                text: Some(format!("New {kind}")),
                layout: default_layout("auto", "auto"),
                ..Self::default()
            };
        };

        let mut props = Self {
            text: Some(spec.default_text.to_string()),
            style: Style::from_defaults(&spec.style),
            layout: default_layout(spec.width, spec.height),
            ..Self::default()
        };
        for &(field, value) in spec.content {
            props.set_content_field(field, value);
        }
        if spec.state == StateAcceptance::TabularData {
            props.data = Some(TableData::starter());
        }
        props
    }

    /// Set a content field by wire name.
    pub fn set_content_field(&mut self, field: &str, value: &str) {
        let value = value.to_string();
        match field {
            "text" => self.text = Some(value),
            "href" => self.href = Some(value),
            "placeholder" => self.placeholder = Some(value),
            "message" => self.message = Some(value),
            "src" => self.src = Some(value),
            "alt" => self.alt = Some(value),
            "title" => self.title = Some(value),
            "description" => self.description = Some(value),
            other => {
                self.extra.insert(other.to_string(), Value::String(value));
            }
        }
    }

    /// Shallow-merge a patch. `style` and `layout` merge key-by-key.
    pub fn merge(&mut self, patch: ElementProperties) {
        merge_fields!(self, patch;
            text, href, placeholder, message, src, alt, title, description, data,
        );
        self.style.merge(patch.style);
        self.layout.merge(patch.layout);
        self.extra.extend(patch.extra);
    }
}

fn default_layout(width: &str, height: &str) -> Layout {
    Layout {
        position: Some("absolute".to_string()),
        left: Some("50%".to_string()),
        top: Some("50%".to_string()),
        transform: Some("translate(-50%, -50%)".to_string()),
        width: Some(width.to_string()),
        height: Some(height.to_string()),
        align: None,
        z_index: None,
    }
}

/// A placeable widget on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub(crate) id: ElementId,
    #[serde(rename = "type")]
    pub(crate) kind: ElementKind,
    #[serde(default)]
    pub properties: ElementProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
}

impl Element {
    /// Create an element with kind defaults and the given overrides merged on top.
    pub fn new(kind: ElementKind, overrides: ElementProperties) -> Self {
        let mut properties = ElementProperties::defaults_for(&kind);
        properties.merge(overrides);
        Self {
            id: Uuid::new_v4(),
            kind,
            properties,
            group_id: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Copy of this element under a fresh id, outside any group.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: self.kind.clone(),
            properties: self.properties.clone(),
            group_id: None,
        }
    }

    /// Pixel bounding box derived from the layout strings.
    pub fn bounds(&self) -> Rect {
        let layout = &self.properties.layout;
        let (x, y) = (layout.left_px(), layout.top_px());
        Rect::new(x, y, x + layout.width_px(), y + layout.height_px())
    }
}

/// Parse a CSS pixel length such as `"12px"` or `"12.5"`.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Format a pixel length in canonical form (`50px`, `12.5px`).
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

/// Rewrite a pixel string in canonical form. Non-pixel values yield `None`.
fn canonical_px(value: &str) -> Option<String> {
    if !value.trim().ends_with("px") {
        return None;
    }
    parse_px(value).map(format_px)
}

fn px_or_zero(value: Option<&str>) -> f64 {
    value.and_then(parse_px).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_defaults() {
        let button = Element::new(ElementKind::Button, ElementProperties::default());
        assert_eq!(button.kind(), &ElementKind::Button);
        assert_eq!(button.properties.text.as_deref(), Some("Click me"));
        assert_eq!(button.properties.layout.width.as_deref(), Some("fit-content"));
        assert_eq!(button.properties.layout.height.as_deref(), Some("auto"));
        assert_eq!(button.properties.style.background_color.as_deref(), Some("#3B82F6"));
        assert!(button.group_id.is_none());
    }

    #[test]
    fn test_size_defaults_per_kind() {
        let input = ElementProperties::defaults_for(&ElementKind::Input);
        assert_eq!(input.layout.width.as_deref(), Some("200px"));
        assert_eq!(input.layout.height.as_deref(), Some("auto"));

        let container = ElementProperties::defaults_for(&ElementKind::Container);
        assert_eq!(container.layout.width.as_deref(), Some("400px"));
        assert_eq!(container.layout.height.as_deref(), Some("300px"));

        let table = ElementProperties::defaults_for(&ElementKind::Table);
        assert_eq!(table.data, Some(TableData::starter()));
    }

    #[test]
    fn test_unknown_kind_gets_blank_default() {
        let kind = ElementKind::from("carousel");
        assert_eq!(kind, ElementKind::Other("carousel".to_string()));
        let props = ElementProperties::defaults_for(&kind);
        assert_eq!(props.text.as_deref(), Some("New carousel"));
        assert!(props.style.is_empty());
        assert_eq!(kind.state_acceptance(), StateAcceptance::StructuredPatch);
    }

    #[test]
    fn test_state_acceptance_table() {
        assert_eq!(ElementKind::Text.state_acceptance(), StateAcceptance::RawText);
        assert_eq!(ElementKind::Input.state_acceptance(), StateAcceptance::RawText);
        assert_eq!(ElementKind::Table.state_acceptance(), StateAcceptance::TabularData);
        assert_eq!(ElementKind::Container.state_acceptance(), StateAcceptance::StructuredPatch);
    }

    #[test]
    fn test_every_known_kind_has_a_spec() {
        for kind in [
            ElementKind::Button,
            ElementKind::Text,
            ElementKind::Input,
            ElementKind::Table,
            ElementKind::Container,
            ElementKind::Image,
            ElementKind::Card,
        ] {
            assert!(kind.spec().is_some(), "missing spec for {kind}");
        }
    }

    #[test]
    fn test_overrides_merge_nested_keys() {
        let overrides = ElementProperties {
            text: Some("Buy".to_string()),
            style: Style {
                color: Some("#111111".to_string()),
                ..Style::default()
            },
            layout: Layout {
                width: Some("120px".to_string()),
                ..Layout::default()
            },
            ..ElementProperties::default()
        };
        let button = Element::new(ElementKind::Button, overrides);
        let props = &button.properties;
        assert_eq!(props.text.as_deref(), Some("Buy"));
        assert_eq!(props.style.color.as_deref(), Some("#111111"));
        // Untouched nested keys keep their defaults
        assert_eq!(props.style.background_color.as_deref(), Some("#3B82F6"));
        assert_eq!(props.layout.width.as_deref(), Some("120px"));
        assert_eq!(props.layout.height.as_deref(), Some("auto"));
    }

    #[test]
    fn test_kind_serializes_as_lowercase_string() {
        let json = serde_json::to_string(&ElementKind::Card).unwrap();
        assert_eq!(json, "\"card\"");
        let other: ElementKind = serde_json::from_str("\"slider\"").unwrap();
        assert_eq!(other.as_str(), "slider");
    }

    #[test]
    fn test_properties_keep_unknown_fields() {
        let json = r#"{"text":"Go","action":"alert(1)","style":{"backgroundColor":"red"}}"#;
        let props: ElementProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.text.as_deref(), Some("Go"));
        assert_eq!(props.style.background_color.as_deref(), Some("red"));
        assert_eq!(props.extra.get("action"), Some(&Value::String("alert(1)".into())));

        let back = serde_json::to_value(&props).unwrap();
        assert_eq!(back["action"], "alert(1)");
    }

    #[test]
    fn test_element_json_field_names() {
        let mut element = Element::new(ElementKind::Text, ElementProperties::default());
        element.group_id = Some(Uuid::new_v4());
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], "text");
        assert!(value.get("groupId").is_some());
        assert_eq!(value["properties"]["style"]["fontSize"], "16px");
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("50px"), Some(50.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("30"), Some(30.0));
        assert_eq!(parse_px("50%"), None);
        assert_eq!(parse_px("auto"), None);
        assert_eq!(format_px(50.0), "50px");
        assert_eq!(format_px(12.5), "12.5px");
    }

    #[test]
    fn test_set_position() {
        let mut layout = default_layout("200px", "auto");
        layout.position = Some("relative".to_string());
        layout.set_position(50.0, 75.0);
        assert_eq!(layout.left.as_deref(), Some("50px"));
        assert_eq!(layout.top.as_deref(), Some("75px"));
        assert_eq!(layout.transform.as_deref(), Some("translate(50px, 75px)"));
        assert_eq!(layout.position.as_deref(), Some("absolute"));
        assert_eq!(layout.width.as_deref(), Some("200px"));
    }

    #[test]
    fn test_normalize_layout() {
        let mut layout = Layout {
            left: Some("10.0px".to_string()),
            width: Some("  80px".to_string()),
            height: Some("auto".to_string()),
            ..Layout::default()
        };
        layout.normalize();
        assert_eq!(layout.left.as_deref(), Some("10px"));
        assert_eq!(layout.top.as_deref(), Some("50%"));
        assert_eq!(layout.width.as_deref(), Some("80px"));
        assert_eq!(layout.height.as_deref(), Some("auto"));
        assert_eq!(layout.transform.as_deref(), Some("translate(10px, 50%)"));
    }

    #[test]
    fn test_normalize_keeps_existing_transform() {
        let mut layout = Layout {
            transform: Some("translate(-50%, -50%)".to_string()),
            ..Layout::default()
        };
        layout.normalize();
        assert_eq!(layout.transform.as_deref(), Some("translate(-50%, -50%)"));
    }

    #[test]
    fn test_bounds_from_layout() {
        let mut element = Element::new(ElementKind::Container, ElementProperties::default());
        element.properties.layout.set_position(10.0, 20.0);
        assert_eq!(element.bounds(), Rect::new(10.0, 20.0, 410.0, 320.0));

        let button = Element::new(ElementKind::Button, ElementProperties::default());
        // 50% offsets and fit-content width are not pixel values
        assert_eq!(button.bounds(), Rect::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let mut original = Element::new(ElementKind::Card, ElementProperties::default());
        original.group_id = Some(Uuid::new_v4());
        let copy = original.duplicate();
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.properties, original.properties);
        assert!(copy.group_id.is_none());
    }
}
