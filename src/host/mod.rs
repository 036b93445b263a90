//! Collaborators owned by the host viewer
//!
//! The measurement core never reaches for globals: pixel data, metadata,
//! the per-surface measurement list, coordinate transforms, drawing and
//! logging are all injected through the traits below. Simple in-memory
//! implementations are provided for embedding and tests.

pub mod pixels;
pub mod store;
pub mod viewport;

pub use pixels::RasterAccessor;
pub use store::{InMemoryStore, SurfaceId};
pub use viewport::ViewportTransform;

use tiny_skia::Color;

use crate::domain::core::Point;
use crate::domain::image::{Image, PixelBox};
use crate::domain::measurement::{BoundingBox, Measurement};

/// Fire-and-forget developer log channel
pub trait Logger: Send + Sync {
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Source of raw intensity samples
pub trait PixelAccessor {
    /// Returns the samples inside `window` in row-major order
    ///
    /// Reads are expected to be deterministic and free of side effects.
    fn samples(&self, image: &Image, window: PixelBox) -> Vec<f64>;
}

/// Per-image metadata lookup
pub trait MetaDataProvider {
    /// Physical `(row, column)` pixel spacing for an image, if known
    fn pixel_spacing(&self, image_id: &str) -> Option<(f64, f64)>;
}

/// Store of measurements registered per rendering surface
pub trait MeasurementStore {
    /// Measurements attached to `surface`, or `None` if nothing is registered
    fn measurements_mut(&mut self, surface: SurfaceId) -> Option<&mut Vec<Measurement>>;
}

/// Mapping between image pixels and the rendering surface
pub trait CanvasTransform {
    fn image_to_canvas(&self, p: Point) -> Point;
    fn canvas_to_image(&self, p: Point) -> Point;
    /// Clockwise viewport rotation in degrees
    fn rotation(&self) -> f64;
}

/// Stroke appearance for outlines, handles and link lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
    pub dashed: bool,
}

/// Appearance of the stats label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
    pub background: Color,
    pub padding: f32,
}

/// Drawing primitives of the rendering surface, all in canvas coordinates
pub trait DrawingSurface {
    /// Strokes the closed outline through `corners`
    fn draw_outline(&mut self, corners: &[Point; 4], style: &LineStyle);

    /// Draws a marker at each handle position
    fn draw_handles(&mut self, handles: &[Point], radius: f32, style: &LineStyle);

    /// Draws a line connecting the label to the shape
    fn draw_link_line(&mut self, from: Point, to: Point, style: &LineStyle);

    /// Draws a text box whose top-left corner is `anchor` and returns its extent
    fn draw_text_box(&mut self, lines: &[String], anchor: Point, style: &TextStyle) -> BoundingBox;
}
