//! Alignment guides and snapping for dragged elements.
//!
//! Guides are lines at the canvas midpoints and at every element's edges.
//! While an element is dragged, each axis is pulled toward the first guide
//! within [`SNAP_THRESHOLD`]. The pull is proportional to how close the
//! pointer is, so the element eases onto the guide instead of jumping.

use crate::config::EditorConfig;
use crate::element::{Element, ElementId};
use kurbo::{Point, Size};

/// Distance (in canvas pixels) within which a guide pulls a dragged element.
pub const SNAP_THRESHOLD: f64 = 5.0;

/// Distance within which a guide is drawn.
pub const GUIDE_VISIBILITY_THRESHOLD: f64 = 15.0;

/// Guides fainter than this are not drawn.
pub const MIN_GUIDE_OPACITY: f64 = 0.1;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A vertical line at some x; constrains horizontal movement.
    Vertical,
    /// A horizontal line at some y; constrains vertical movement.
    Horizontal,
}

/// Candidate guide positions for both axes, sorted ascending and deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guides {
    /// x coordinates of vertical guides.
    pub vertical: Vec<f64>,
    /// y coordinates of horizontal guides.
    pub horizontal: Vec<f64>,
}

impl Guides {
    /// Compute guides from the canvas midpoints and element edges.
    pub fn compute(canvas: Size, elements: &[Element]) -> Self {
        let mut vertical = Vec::with_capacity(elements.len() * 2 + 1);
        let mut horizontal = Vec::with_capacity(elements.len() * 2 + 1);
        vertical.push(canvas.width / 2.0);
        horizontal.push(canvas.height / 2.0);

        for element in elements {
            let bounds = element.bounds();
            vertical.extend([bounds.x0, bounds.x1]);
            horizontal.extend([bounds.y0, bounds.y1]);
        }

        Self {
            vertical: sorted_unique(vertical),
            horizontal: sorted_unique(horizontal),
        }
    }

    pub fn for_axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }
}

fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Snap outcome on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSnap {
    /// Reported coordinate after easing toward the guide.
    pub position: f64,
    /// The guide that captured the coordinate, if any.
    pub active: Option<f64>,
}

/// Ease `position` toward the first guide within `threshold`.
///
/// Guides are tried in ascending order, so on a tie the lowest coordinate
/// wins. Only one guide contributes; nearby guides are never averaged.
pub fn snap_axis(position: f64, guides: &[f64], threshold: f64) -> AxisSnap {
    for &guide in guides {
        let distance = (guide - position).abs();
        if distance < threshold {
            let progress = 1.0 - distance / threshold;
            return AxisSnap {
                position: position + (guide - position) * progress,
                active: Some(guide),
            };
        }
    }
    AxisSnap {
        position,
        active: None,
    }
}

/// Result of snapping a dragged point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The reported point.
    pub point: Point,
    /// Active vertical guide (x), if the x coordinate was captured.
    pub active_x: Option<f64>,
    /// Active horizontal guide (y), if the y coordinate was captured.
    pub active_y: Option<f64>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            active_x: None,
            active_y: None,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.active_x.is_some() || self.active_y.is_some()
    }
}

/// Snap both axes of `point` independently.
pub fn snap_point(point: Point, guides: &Guides, threshold: f64) -> SnapResult {
    let x = snap_axis(point.x, &guides.vertical, threshold);
    let y = snap_axis(point.y, &guides.horizontal, threshold);
    SnapResult {
        point: Point::new(x.position, y.position),
        active_x: x.active,
        active_y: y.active,
    }
}

/// A guide line to draw, with its fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleGuide {
    pub axis: Axis,
    pub position: f64,
    /// 0..=1; active guides are always 1.
    pub opacity: f64,
    pub active: bool,
}

/// Guides on one axis close enough to `position` to draw.
///
/// Opacity falls off linearly to zero at `threshold`; guides below
/// [`MIN_GUIDE_OPACITY`] are dropped. The active guide is drawn at full
/// opacity regardless of distance.
pub fn visible_guides(
    axis: Axis,
    position: f64,
    guides: &[f64],
    active: Option<f64>,
    threshold: f64,
) -> Vec<VisibleGuide> {
    guides
        .iter()
        .filter_map(|&guide| {
            if active == Some(guide) {
                return Some(VisibleGuide {
                    axis,
                    position: guide,
                    opacity: 1.0,
                    active: true,
                });
            }
            let distance = (guide - position).abs();
            if distance > threshold {
                return None;
            }
            let opacity = 1.0 - distance / threshold;
            (opacity >= MIN_GUIDE_OPACITY).then_some(VisibleGuide {
                axis,
                position: guide,
                opacity,
                active: false,
            })
        })
        .collect()
}

/// Drag state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No drag in progress; no guide is active.
    Idle,
    /// An element is being dragged.
    Dragging {
        element: ElementId,
        /// Last raw pointer-derived position.
        raw: Point,
        /// Last snapped position.
        snap: SnapResult,
    },
}

/// Tracks one drag gesture against the current guides.
#[derive(Debug, Clone)]
pub struct DragSession {
    guides: Guides,
    state: DragState,
    snap_threshold: f64,
    visibility_threshold: f64,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl DragSession {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            guides: Guides::default(),
            state: DragState::Idle,
            snap_threshold: config.snap_threshold,
            visibility_threshold: config.guide_visibility_threshold,
        }
    }

    /// Recompute guides. Call whenever the canvas size or elements change.
    pub fn refresh(&mut self, canvas: Size, elements: &[Element]) {
        self.guides = Guides::compute(canvas, elements);
    }

    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging `element` from `origin`.
    pub fn begin(&mut self, element: ElementId, origin: Point) {
        self.state = DragState::Dragging {
            element,
            raw: origin,
            snap: SnapResult::none(origin),
        };
    }

    /// Feed a new raw position. Returns `None` when no drag is in progress.
    pub fn drag_to(&mut self, raw: Point) -> Option<SnapResult> {
        let DragState::Dragging { element, .. } = self.state else {
            return None;
        };
        let snap = snap_point(raw, &self.guides, self.snap_threshold);
        self.state = DragState::Dragging { element, raw, snap };
        Some(snap)
    }

    /// Guides to draw for the current drag; empty when idle.
    pub fn visible_guides(&self) -> Vec<VisibleGuide> {
        let DragState::Dragging { raw, snap, .. } = self.state else {
            return Vec::new();
        };
        let mut lines = visible_guides(
            Axis::Vertical,
            raw.x,
            &self.guides.vertical,
            snap.active_x,
            self.visibility_threshold,
        );
        lines.extend(visible_guides(
            Axis::Horizontal,
            raw.y,
            &self.guides.horizontal,
            snap.active_y,
            self.visibility_threshold,
        ));
        lines
    }

    /// End the drag, yielding the element and its final reported position.
    pub fn finish(&mut self) -> Option<(ElementId, Point)> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { element, snap, .. } => Some((element, snap.point)),
            DragState::Idle => None,
        }
    }

    /// Abandon the drag without a result.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
