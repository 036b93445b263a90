//! Viewport transform between image pixels and canvas coordinates
//!
//! Applied to an image point `p`, in order: move the image centre to the
//! origin, flip, pan by `translation` (image pixels), scale, rotate, then
//! move the origin to the canvas centre.

use crate::domain::core::Point;
use crate::host::CanvasTransform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// Canvas pixels per image pixel
    pub scale: f64,
    /// Pan offset in image pixels
    pub translation: Point,
    /// Clockwise rotation in degrees
    pub rotation: f64,
    pub hflip: bool,
    pub vflip: bool,
    /// Image size in pixels (columns, rows)
    pub image_size: (f64, f64),
    /// Canvas size in pixels (width, height)
    pub canvas_size: (f64, f64),
}

impl ViewportTransform {
    /// Unrotated transform that centres the image on the canvas at `scale`
    pub fn new(image_size: (f64, f64), canvas_size: (f64, f64), scale: f64) -> Self {
        Self {
            scale,
            translation: Point::default(),
            rotation: 0.0,
            hflip: false,
            vflip: false,
            image_size,
            canvas_size,
        }
    }

    /// Canvas and image coincide
    pub fn identity(width: f64, height: f64) -> Self {
        Self::new((width, height), (width, height), 1.0)
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_translation(mut self, x: f64, y: f64) -> Self {
        self.translation = Point::new(x, y);
        self
    }

    pub fn with_flips(mut self, hflip: bool, vflip: bool) -> Self {
        self.hflip = hflip;
        self.vflip = vflip;
        self
    }

    fn flip(&self, x: f64, y: f64) -> (f64, f64) {
        (
            if self.hflip { -x } else { x },
            if self.vflip { -y } else { y },
        )
    }
}

impl CanvasTransform for ViewportTransform {
    fn image_to_canvas(&self, p: Point) -> Point {
        let (iw, ih) = self.image_size;
        let (cw, ch) = self.canvas_size;
        let (fx, fy) = self.flip(p.x - iw / 2.0, p.y - ih / 2.0);
        let x = (fx + self.translation.x) * self.scale;
        let y = (fy + self.translation.y) * self.scale;

        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Point::new(cw / 2.0 + x * cos - y * sin, ch / 2.0 + x * sin + y * cos)
    }

    fn canvas_to_image(&self, p: Point) -> Point {
        let (iw, ih) = self.image_size;
        let (cw, ch) = self.canvas_size;
        let (dx, dy) = (p.x - cw / 2.0, p.y - ch / 2.0);

        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let x = (dx * cos + dy * sin) / self.scale - self.translation.x;
        let y = (-dx * sin + dy * cos) / self.scale - self.translation.y;
        let (fx, fy) = self.flip(x, y);
        Point::new(fx + iw / 2.0, fy + ih / 2.0)
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }
}
