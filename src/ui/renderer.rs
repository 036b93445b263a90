//! Measurement layout and a tiny-skia drawing surface
//!
//! Layout (where the outline, handles and label go on the canvas) is computed
//! separately from drawing so it can be tested without a surface. Any
//! `DrawingSurface` can then replay it; `PixmapSurface` is the built-in one.

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect as SkiaRect, Stroke, StrokeDash, Transform};

use crate::config::ToolConfig;
use crate::domain::core::{Point, Rect};
use crate::domain::hit_test::canvas_outline;
use crate::domain::measurement::{BoundingBox, Measurement};
use crate::host::{CanvasTransform, DrawingSurface, LineStyle, TextStyle};
use crate::ui::text::{AnchorSide, auto_anchor, estimate_extent, link_endpoints};

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvasDimensions { width: u32, height: u32 },
}

/// Stats label placement
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    /// Top-left corner on the canvas
    pub anchor: Point,
    pub style: TextStyle,
}

/// Pre-calculated canvas layout of one measurement
#[derive(Debug, Clone, PartialEq)]
pub struct RoiLayout {
    pub outline: [Point; 4],
    pub handles: Vec<Point>,
    pub handle_radius: f32,
    pub line_style: LineStyle,
    pub link_style: LineStyle,
    pub text: Option<TextBlock>,
}

impl RoiLayout {
    /// Lays out a measurement; `None` if it lacks corner handles
    ///
    /// An unmoved label is anchored beside the rectangle on the side chosen by
    /// the viewport rotation relative to the creation rotation. A moved label
    /// stays at its stored image position.
    pub fn from_measurement(
        measurement: &Measurement,
        transform: &dyn CanvasTransform,
        config: &ToolConfig,
        lines: Vec<String>,
    ) -> Option<Self> {
        let (start, end) = measurement.handles().corners()?;
        let outline = canvas_outline(transform, start, end, config.hit_geometry);

        let active = measurement.active || measurement.handles().any_active();
        let color = config.color_for(active);
        let line_style = LineStyle {
            width: config.line_width,
            color,
            dashed: false,
        };

        let text = (!lines.is_empty()).then(|| {
            let style = TextStyle {
                font_size: config.font_size,
                color: config.text_color,
                background: config.text_background,
                padding: 3.0,
            };
            let text_box = &measurement.handles().text_box;
            let anchor = match text_box.position() {
                Some(pinned) if text_box.has_moved => transform.image_to_canvas(pinned),
                _ => {
                    let side = AnchorSide::for_rotation(
                        transform.rotation(),
                        measurement.handles().initial_rotation,
                    );
                    let bounds = bounding_rect(&outline);
                    auto_anchor(&bounds, side, estimate_extent(&lines, &style), config.text_box_offset)
                }
            };
            TextBlock {
                lines,
                anchor,
                style,
            }
        });

        Some(Self {
            outline,
            handles: vec![transform.image_to_canvas(start), transform.image_to_canvas(end)],
            handle_radius: config.handle_radius as f32,
            line_style,
            link_style: LineStyle {
                dashed: true,
                ..line_style
            },
            text,
        })
    }

    /// Replays the layout on a surface, returning the drawn label extent
    pub fn draw(&self, surface: &mut dyn DrawingSurface) -> Option<BoundingBox> {
        surface.draw_outline(&self.outline, &self.line_style);
        surface.draw_handles(&self.handles, self.handle_radius, &self.line_style);

        let text = self.text.as_ref()?;
        let bbox = surface.draw_text_box(&text.lines, text.anchor, &text.style);
        let (from, to) = link_endpoints(&self.outline, &bbox.as_rect());
        surface.draw_link_line(from, to, &self.link_style);
        Some(bbox)
    }
}

/// Axis-aligned bounds of an outline
fn bounding_rect(outline: &[Point; 4]) -> Rect {
    let (mut min, mut max) = (outline[0], outline[0]);
    for p in &outline[1..] {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    Rect::from_corners(min, max)
}

/// Drawing surface backed by a tiny-skia pixmap
///
/// Text boxes are drawn as background panels with estimated metrics;
/// glyph rasterisation is left to hosts with a font stack.
#[derive(Debug)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self, RendererError> {
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidCanvasDimensions { width, height });
        }
        let mut pixmap = Pixmap::new(width, height).ok_or(RendererError::PixmapCreationFailed)?;
        pixmap.fill(Color::TRANSPARENT);
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA bytes of the surface
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap.data().to_vec()
    }

    fn stroke(&mut self, path: Option<tiny_skia::Path>, style: &LineStyle) {
        let Some(path) = path else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(style.color);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.width,
            dash: if style.dashed {
                StrokeDash::new(vec![4.0, 4.0], 0.0)
            } else {
                None
            },
            ..Stroke::default()
        };
        self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

impl DrawingSurface for PixmapSurface {
    fn draw_outline(&mut self, corners: &[Point; 4], style: &LineStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(corners[0].x as f32, corners[0].y as f32);
        for p in &corners[1..] {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        self.stroke(pb.finish(), style);
    }

    fn draw_handles(&mut self, handles: &[Point], radius: f32, style: &LineStyle) {
        for h in handles {
            let mut pb = PathBuilder::new();
            pb.push_circle(h.x as f32, h.y as f32, radius);
            self.stroke(pb.finish(), style);
        }
    }

    fn draw_link_line(&mut self, from: Point, to: Point, style: &LineStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        self.stroke(pb.finish(), style);
    }

    fn draw_text_box(&mut self, lines: &[String], anchor: Point, style: &TextStyle) -> BoundingBox {
        let (width, height) = estimate_extent(lines, style);
        let bbox = BoundingBox {
            left: anchor.x,
            top: anchor.y,
            width,
            height,
        };

        if let Some(rect) = SkiaRect::from_xywh(
            anchor.x as f32,
            anchor.y as f32,
            width as f32,
            height as f32,
        ) {
            let mut paint = Paint::default();
            paint.set_color(style.background);
            let path = PathBuilder::from_rect(rect);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::measurement::HandleKind;
    use crate::host::ViewportTransform;
    use crate::test_utils::{DrawCall, RecordingSurface};

    fn measurement() -> Measurement {
        let mut m = Measurement::at_point(Point::new(10.0, 10.0), 0.0);
        m.move_handle(HandleKind::End, Point::new(50.0, 30.0));
        m
    }

    fn lines() -> Vec<String> {
        vec!["Mean: 1.00".into(), "Std Dev: 0.00".into(), "Area: 4.00 px²".into()]
    }

    #[test]
    fn layout_maps_to_canvas() {
        let t = ViewportTransform::new((100.0, 100.0), (200.0, 200.0), 2.0);
        let layout = RoiLayout::from_measurement(&measurement(), &t, &ToolConfig::default(), lines())
            .unwrap();

        assert_eq!(layout.outline[0], Point::new(20.0, 20.0));
        assert_eq!(layout.outline[2], Point::new(100.0, 60.0));
        assert_eq!(layout.handles, vec![Point::new(20.0, 20.0), Point::new(100.0, 60.0)]);

        // Unmoved label sits right of the rectangle
        let text = layout.text.unwrap();
        assert_eq!(text.anchor.x, 100.0 + ToolConfig::default().text_box_offset.x);
    }

    #[test]
    fn layout_requires_corners() {
        let t = ViewportTransform::identity(100.0, 100.0);
        assert!(RoiLayout::from_measurement(&Measurement::default(), &t, &ToolConfig::default(), lines()).is_none());
    }

    #[test]
    fn pinned_label_keeps_its_position() {
        let t = ViewportTransform::identity(100.0, 100.0);
        let mut m = measurement();
        m.move_text_box(Point::new(5.0, 80.0));
        let layout = RoiLayout::from_measurement(&m, &t, &ToolConfig::default(), lines()).unwrap();
        assert_eq!(layout.text.unwrap().anchor, Point::new(5.0, 80.0));
    }

    #[test]
    fn label_moves_below_after_quarter_turn() {
        let t = ViewportTransform::identity(100.0, 100.0).with_rotation(90.0);
        let layout = RoiLayout::from_measurement(&measurement(), &t, &ToolConfig::default(), lines()).unwrap();
        let bounds = bounding_rect(&layout.outline);
        assert!(layout.text.unwrap().anchor.y >= bounds.bottom());
    }

    #[test]
    fn active_measurement_uses_active_color() {
        let t = ViewportTransform::identity(100.0, 100.0);
        let config = ToolConfig::default();
        let mut m = measurement();
        m.set_handle_active(HandleKind::Start, true);
        let layout = RoiLayout::from_measurement(&m, &t, &config, Vec::new()).unwrap();
        assert_eq!(layout.line_style.color, config.active_color);
        assert!(layout.text.is_none());
    }

    #[test]
    fn draw_replays_in_order() {
        let t = ViewportTransform::identity(100.0, 100.0);
        let layout = RoiLayout::from_measurement(&measurement(), &t, &ToolConfig::default(), lines()).unwrap();
        let mut surface = RecordingSurface::default();
        let bbox = layout.draw(&mut surface);

        assert!(bbox.is_some());
        assert!(matches!(surface.calls[0], DrawCall::Outline(_)));
        assert!(matches!(surface.calls[1], DrawCall::Handles(ref h) if h.len() == 2));
        assert!(matches!(surface.calls[2], DrawCall::TextBox(ref l, _) if l.len() == 3));
        assert!(matches!(surface.calls[3], DrawCall::LinkLine(_, _)));
    }

    #[test]
    fn pixmap_surface_rejects_empty_canvas() {
        assert!(matches!(
            PixmapSurface::new(0, 10),
            Err(RendererError::InvalidCanvasDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn pixmap_surface_paints_outline_and_label() {
        let t = ViewportTransform::identity(200.0, 200.0);
        let layout = RoiLayout::from_measurement(&measurement(), &t, &ToolConfig::default(), lines()).unwrap();
        let mut surface = PixmapSurface::new(200, 200).unwrap();
        let bbox = layout.draw(&mut surface).unwrap();

        let pixmap = surface.pixmap();
        // On the top edge of the outline
        let edge = pixmap.pixel(30, 10).unwrap();
        assert!(edge.alpha() > 0);
        // Inside the rectangle nothing is filled
        assert_eq!(pixmap.pixel(30, 20).unwrap().alpha(), 0);
        // Inside the label panel
        let (lx, ly) = ((bbox.left + bbox.width / 2.0) as u32, (bbox.top + bbox.height / 2.0) as u32);
        assert!(pixmap.pixel(lx, ly).unwrap().alpha() > 0);

        assert_eq!(surface.to_rgba().len(), 200 * 200 * 4);
    }
}
