//! Image description, physical pixel spacing and integer sample windows

use crate::domain::core::Point;

/// The raster an ROI is drawn over
///
/// Pixel data itself is not held here; samples are fetched through
/// `host::PixelAccessor` using the image id. `rows` and `columns` bound every
/// sample window, so an image without them yields no samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    pub image_id: String,
    /// Number of pixel rows (height)
    pub rows: u32,
    /// Number of pixel columns (width)
    pub columns: u32,
    /// Physical distance between row centres (vertical step), usually mm
    pub row_pixel_spacing: Option<f64>,
    /// Physical distance between column centres (horizontal step), usually mm
    pub column_pixel_spacing: Option<f64>,
    /// Acquisition modality, e.g. "CT" or "MR"
    pub modality: Option<String>,
}

impl Image {
    /// Creates an image of the given size with no spacing information
    pub fn new(image_id: impl Into<String>, columns: u32, rows: u32) -> Self {
        Self {
            image_id: image_id.into(),
            rows,
            columns,
            ..Default::default()
        }
    }

    /// True if the image has at least one pixel
    pub fn has_extent(&self) -> bool {
        self.rows > 0 && self.columns > 0
    }

    /// Sets both pixel spacings
    pub fn with_pixel_spacing(mut self, row: f64, column: f64) -> Self {
        self.row_pixel_spacing = Some(row);
        self.column_pixel_spacing = Some(column);
        self
    }

    /// Sets the acquisition modality
    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        self.modality = Some(modality.into());
        self
    }
}

/// Resolved physical pixel spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpacing {
    pub row: f64,
    pub column: f64,
    /// False when either axis fell back to the unit default
    pub calibrated: bool,
}

impl PixelSpacing {
    /// Spacing of an uncalibrated image: one unit per pixel
    pub const UNIT: PixelSpacing = PixelSpacing {
        row: 1.0,
        column: 1.0,
        calibrated: false,
    };

    /// Resolves spacing from explicit values, falling back to 1 per axis
    ///
    /// Non-positive or non-finite values count as missing.
    pub fn resolve(row: Option<f64>, column: Option<f64>) -> Self {
        match (valid_spacing(row), valid_spacing(column)) {
            (Some(row), Some(column)) => Self {
                row,
                column,
                calibrated: true,
            },
            (row, column) => Self {
                row: row.unwrap_or(1.0),
                column: column.unwrap_or(1.0),
                calibrated: false,
            },
        }
    }
}

/// Keeps a spacing value only if it is finite and positive
pub(crate) fn valid_spacing(value: Option<f64>) -> Option<f64> {
    value.filter(|s| s.is_finite() && *s > 0.0)
}

/// Half-open integer window `[x_min, x_max) × [y_min, y_max)` of pixel indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl PixelBox {
    /// Computes the window covered by two handle positions, clamped to the image
    ///
    /// Each axis spans `floor(min)` up to `ceil(max)` so a sub-pixel rectangle
    /// still touches the pixel it lies in.
    pub fn from_handles(start: Point, end: Point, columns: u32, rows: u32) -> Self {
        let clamp_axis = |a: f64, b: f64, limit: u32| -> (u32, u32) {
            let lo = a.min(b).floor().clamp(0.0, limit as f64) as u32;
            let hi = a.max(b).ceil().clamp(0.0, limit as f64) as u32;
            (lo, hi.max(lo))
        };

        let (x_min, x_max) = clamp_axis(start.x, end.x, columns);
        let (y_min, y_max) = clamp_axis(start.y, end.y, rows);
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Number of columns in the window
    pub fn width(&self) -> u32 {
        self.x_max - self.x_min
    }

    /// Number of rows in the window
    pub fn height(&self) -> u32 {
        self.y_max - self.y_min
    }

    /// Number of pixels in the window
    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
