//! Rectangle ROI measurement entity
//!
//! Handles are read-only from outside; every edit goes through a method that
//! marks the cached statistics stale. The statistics pair (`cached_stats`,
//! `invalidated`) is written only by the statistics engine in this `domain`
//! module.

use crate::domain::core::{Point, Rect};

/// A draggable control point in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Handle {
    pub x: f64,
    pub y: f64,
    /// Pointer is hovering the handle
    pub highlight: bool,
    /// Handle is being dragged
    pub active: bool,
}

impl Handle {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            highlight: false,
            active: false,
        }
    }

    /// Position as a plain point
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for Handle {
    fn from(p: Point) -> Self {
        Handle::new(p.x, p.y)
    }
}

/// Canvas-space box occupied by the rendered stats label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

/// Position of the stats label, which the user may drag independently
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBoxHandle {
    /// Anchor in image coordinates; `None` until first laid out
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// Last rendered extent on the canvas
    pub bounding_box: Option<BoundingBox>,
    /// Set once the user relocates the label; stops automatic anchoring
    pub has_moved: bool,
    pub active: bool,
}

impl TextBoxHandle {
    pub fn position(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }
}

/// Named handle of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Start,
    End,
    TextBox,
}

/// Handle set of a rectangle measurement
///
/// `start`/`end` are optional only so that malformed input coming from a
/// host can be represented and rejected; the factory always fills both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Handles {
    pub start: Option<Handle>,
    pub end: Option<Handle>,
    pub text_box: TextBoxHandle,
    /// Viewport rotation in degrees when the measurement was created
    pub initial_rotation: f64,
}

impl Handles {
    /// Both corner positions, or `None` if either is missing
    pub fn corners(&self) -> Option<(Point, Point)> {
        Some((self.start?.point(), self.end?.point()))
    }

    /// True if any handle is hovered or dragged
    pub fn any_active(&self) -> bool {
        let corner = |h: &Option<Handle>| h.is_some_and(|h| h.active || h.highlight);
        corner(&self.start) || corner(&self.end) || self.text_box.active
    }
}

/// Last computed statistics of the enclosed region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedStats {
    /// Physical area (spacing units squared)
    pub area: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// One rectangle region-of-interest measurement
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    handles: Handles,
    pub visible: bool,
    /// Measurement as a whole is selected
    pub active: bool,
    invalidated: bool,
    cached_stats: Option<CachedStats>,
}

impl Default for Measurement {
    fn default() -> Self {
        Self::from_handles(Handles::default())
    }
}

impl Measurement {
    /// Wraps a handle set into a visible measurement whose statistics are stale
    pub fn from_handles(handles: Handles) -> Self {
        Self {
            handles,
            visible: true,
            active: false,
            invalidated: true,
            cached_stats: None,
        }
    }

    /// A degenerate rectangle with both corners at `point`
    pub fn at_point(point: Point, initial_rotation: f64) -> Self {
        Self::from_handles(Handles {
            start: Some(point.into()),
            end: Some(point.into()),
            text_box: TextBoxHandle::default(),
            initial_rotation,
        })
    }

    pub fn handles(&self) -> &Handles {
        &self.handles
    }

    /// True when the cached statistics no longer match the geometry
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Statistics from the last computation, if any
    pub fn cached_stats(&self) -> Option<&CachedStats> {
        self.cached_stats.as_ref()
    }

    /// Marks cached statistics stale without touching geometry
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Moves one handle to a new image-space position
    ///
    /// Moving a corner that is missing creates it.
    pub fn move_handle(&mut self, kind: HandleKind, to: Point) {
        match kind {
            HandleKind::Start => set_corner(&mut self.handles.start, to),
            HandleKind::End => set_corner(&mut self.handles.end, to),
            HandleKind::TextBox => self.move_text_box(to),
        }
        self.invalidated = true;
    }

    /// Relocates the stats label, pinning it away from automatic anchoring
    pub fn move_text_box(&mut self, to: Point) {
        let text_box = &mut self.handles.text_box;
        text_box.x = Some(to.x);
        text_box.y = Some(to.y);
        text_box.has_moved = true;
        self.invalidated = true;
    }

    /// Moves the whole rectangle by an image-space offset
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for corner in [&mut self.handles.start, &mut self.handles.end]
            .into_iter()
            .flatten()
        {
            corner.x += dx;
            corner.y += dy;
        }
        if self.handles.text_box.has_moved {
            let text_box = &mut self.handles.text_box;
            text_box.x = text_box.x.map(|x| x + dx);
            text_box.y = text_box.y.map(|y| y + dy);
        }
        self.invalidated = true;
    }

    /// Flags a handle as being dragged (or released)
    pub fn set_handle_active(&mut self, kind: HandleKind, active: bool) {
        match kind {
            HandleKind::Start => {
                if let Some(h) = self.handles.start.as_mut() {
                    h.active = active;
                }
            }
            HandleKind::End => {
                if let Some(h) = self.handles.end.as_mut() {
                    h.active = active;
                }
            }
            HandleKind::TextBox => self.handles.text_box.active = active,
        }
    }

    /// Flags a corner handle as hovered
    pub fn set_handle_highlight(&mut self, kind: HandleKind, highlight: bool) {
        let slot = match kind {
            HandleKind::Start => &mut self.handles.start,
            HandleKind::End => &mut self.handles.end,
            HandleKind::TextBox => return,
        };
        if let Some(h) = slot.as_mut() {
            h.highlight = highlight;
        }
    }

    /// Records where the label was drawn
    ///
    /// The image-space anchor is only taken while the user has not moved the
    /// label. Label placement does not affect statistics.
    pub(crate) fn place_text_box(&mut self, bounding_box: BoundingBox, anchor: Point) {
        let text_box = &mut self.handles.text_box;
        text_box.bounding_box = Some(bounding_box);
        if !text_box.has_moved {
            text_box.x = Some(anchor.x);
            text_box.y = Some(anchor.y);
        }
    }

    /// Stores freshly computed statistics and clears the stale flag in one step
    pub(super) fn commit_stats(&mut self, stats: CachedStats) {
        self.cached_stats = Some(stats);
        self.invalidated = false;
    }
}

#[cfg(test)]
impl Measurement {
    /// Measurement with the given handles and stats marked fresh
    pub(crate) fn with_fresh_stats(handles: Handles, stats: CachedStats) -> Self {
        let mut m = Self::from_handles(handles);
        m.commit_stats(stats);
        m
    }
}

fn set_corner(slot: &mut Option<Handle>, to: Point) {
    match slot {
        Some(handle) => {
            handle.x = to.x;
            handle.y = to.y;
        }
        None => *slot = Some(to.into()),
    }
}
