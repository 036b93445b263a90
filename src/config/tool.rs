use tiny_skia::Color;

use crate::domain::core::Point;

/// How the rectangle is reconstructed on the canvas for hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitGeometry {
    /// Bounding box of the two mapped corners; exact for 90° rotations
    #[default]
    AxisAligned,
    /// All four image-space corners mapped individually; follows any rotation
    Rotated,
}

/// Input device kind, which selects the hit tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionKind {
    #[default]
    Mouse,
    Touch,
}

/// User-facing configuration of the rectangle ROI tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub name: String,
    /// Canvas distance within which a mouse pointer counts as near the outline
    pub mouse_tolerance: f64,
    /// Same for touch input
    pub touch_tolerance: f64,
    /// Canvas radius of the corner handle markers
    pub handle_radius: f64,
    /// Canvas offset between the rectangle and an unmoved text box
    pub text_box_offset: Point,
    pub hit_geometry: HitGeometry,
    pub line_width: f32,
    pub font_size: f32,
    pub idle_color: Color,
    pub active_color: Color,
    pub text_color: Color,
    pub text_background: Color,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            mouse_tolerance: Self::DEFAULT_MOUSE_TOLERANCE,
            touch_tolerance: Self::DEFAULT_TOUCH_TOLERANCE,
            handle_radius: Self::DEFAULT_HANDLE_RADIUS,
            text_box_offset: Point::new(10.0, 0.0),
            hit_geometry: HitGeometry::AxisAligned,
            line_width: 1.0,
            font_size: 14.0,
            idle_color: Color::from_rgba8(255, 255, 0, 255),
            active_color: Color::from_rgba8(0, 255, 0, 255),
            text_color: Color::from_rgba8(255, 255, 255, 255),
            text_background: Color::from_rgba8(0, 0, 0, 160),
        }
    }
}

impl ToolConfig {
    pub const DEFAULT_NAME: &'static str = "RectangleRoi";
    pub const DEFAULT_MOUSE_TOLERANCE: f64 = 6.0;
    pub const DEFAULT_TOUCH_TOLERANCE: f64 = 25.0;
    pub const DEFAULT_HANDLE_RADIUS: f64 = 6.0;
    pub const MIN_TOLERANCE: f64 = 1.0;
    pub const MAX_TOLERANCE: f64 = 64.0;

    /// Default configuration under a custom tool name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Clamps a tolerance into the supported range; non-finite input falls back to the default
    pub fn sanitize_tolerance(value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(Self::MIN_TOLERANCE, Self::MAX_TOLERANCE)
        } else {
            Self::DEFAULT_MOUSE_TOLERANCE
        }
    }

    pub fn with_mouse_tolerance(mut self, tolerance: f64) -> Self {
        self.mouse_tolerance = Self::sanitize_tolerance(tolerance);
        self
    }

    pub fn with_touch_tolerance(mut self, tolerance: f64) -> Self {
        self.touch_tolerance = Self::sanitize_tolerance(tolerance);
        self
    }

    pub fn with_hit_geometry(mut self, geometry: HitGeometry) -> Self {
        self.hit_geometry = geometry;
        self
    }

    pub fn with_text_box_offset(mut self, dx: f64, dy: f64) -> Self {
        self.text_box_offset = Point::new(dx, dy);
        self
    }

    /// Tolerance for the given input device
    pub fn tolerance_for(&self, interaction: InteractionKind) -> f64 {
        match interaction {
            InteractionKind::Mouse => self.mouse_tolerance,
            InteractionKind::Touch => self.touch_tolerance,
        }
    }

    /// Outline colour depending on whether the measurement is being interacted with
    pub fn color_for(&self, active: bool) -> Color {
        if active { self.active_color } else { self.idle_color }
    }
}
