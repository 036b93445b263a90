//! Shared test doubles and fixtures

use std::sync::Mutex;

use crate::domain::core::Point;
use crate::domain::image::Image;
use crate::domain::measurement::BoundingBox;
use crate::host::{DrawingSurface, LineStyle, Logger, RasterAccessor, TextStyle};

pub const FIXTURE_SPACING: f64 = 0.8984375;

/// 3x3 calibrated image matching `fixture_raster`
pub fn fixture_image() -> Image {
    Image::new("fixture", 3, 3).with_pixel_spacing(FIXTURE_SPACING, FIXTURE_SPACING)
}

/// Row-major samples:
/// ```text
/// 100 100 100
/// 100   4   5
/// 100   3   6
/// ```
pub fn fixture_raster() -> RasterAccessor {
    RasterAccessor::new(
        3,
        3,
        vec![100.0, 100.0, 100.0, 100.0, 4.0, 5.0, 100.0, 3.0, 6.0],
    )
    .expect("fixture dimensions")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
}

/// Logger that keeps every message for inspection
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().expect("logger lock").clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(LogLevel::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warn)
    }

    fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn error(&self, message: &str) {
        self.entries.lock().expect("logger lock").push((LogLevel::Error, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.entries.lock().expect("logger lock").push((LogLevel::Warn, message.to_string()));
    }
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Outline([Point; 4]),
    Handles(Vec<Point>),
    LinkLine(Point, Point),
    TextBox(Vec<String>, Point),
}

/// Surface that records calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl DrawingSurface for RecordingSurface {
    fn draw_outline(&mut self, corners: &[Point; 4], _style: &LineStyle) {
        self.calls.push(DrawCall::Outline(*corners));
    }

    fn draw_handles(&mut self, handles: &[Point], _radius: f32, _style: &LineStyle) {
        self.calls.push(DrawCall::Handles(handles.to_vec()));
    }

    fn draw_link_line(&mut self, from: Point, to: Point, _style: &LineStyle) {
        self.calls.push(DrawCall::LinkLine(from, to));
    }

    fn draw_text_box(&mut self, lines: &[String], anchor: Point, _style: &TextStyle) -> BoundingBox {
        self.calls.push(DrawCall::TextBox(lines.to_vec(), anchor));
        BoundingBox {
            left: anchor.x,
            top: anchor.y,
            width: 100.0,
            height: 20.0 * lines.len() as f64,
        }
    }
}
