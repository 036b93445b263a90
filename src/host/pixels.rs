//! Pixel and metadata sources backed by plain memory

use std::collections::HashMap;

use crate::domain::image::{Image, PixelBox};
use crate::host::{MetaDataProvider, PixelAccessor};

/// Single-channel raster stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct RasterAccessor {
    columns: u32,
    rows: u32,
    data: Vec<f64>,
}

impl RasterAccessor {
    /// Wraps row-major samples; returns `None` if the length does not match
    pub fn new(columns: u32, rows: u32, data: Vec<f64>) -> Option<Self> {
        (data.len() == columns as usize * rows as usize).then_some(Self {
            columns,
            rows,
            data,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }
}

impl PixelAccessor for RasterAccessor {
    fn samples(&self, _image: &Image, window: PixelBox) -> Vec<f64> {
        let x_max = window.x_max.min(self.columns) as usize;
        let y_max = window.y_max.min(self.rows) as usize;
        let x_min = (window.x_min as usize).min(x_max);
        let y_min = (window.y_min as usize).min(y_max);
        let stride = self.columns as usize;

        (y_min..y_max)
            .flat_map(|row| self.data[row * stride + x_min..row * stride + x_max].iter().copied())
            .collect()
    }
}

/// Spacing table keyed by image id, as `(row, column)`
impl MetaDataProvider for HashMap<String, (f64, f64)> {
    fn pixel_spacing(&self, image_id: &str) -> Option<(f64, f64)> {
        self.get(image_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_length() {
        assert!(RasterAccessor::new(3, 3, vec![0.0; 8]).is_none());
        assert!(RasterAccessor::new(3, 3, vec![0.0; 9]).is_some());
    }

    #[test]
    fn samples_window_row_major() {
        let raster = RasterAccessor::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let image = Image::new("img", 3, 2);
        let window = PixelBox {
            x_min: 1,
            y_min: 0,
            x_max: 3,
            y_max: 2,
        };
        assert_eq!(raster.samples(&image, window), vec![2.0, 3.0, 5.0, 6.0]);
    }

    #[test]
    fn window_outside_raster_is_trimmed() {
        let raster = RasterAccessor::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let image = Image::new("img", 2, 2);
        let window = PixelBox {
            x_min: 1,
            y_min: 1,
            x_max: 9,
            y_max: 9,
        };
        assert_eq!(raster.samples(&image, window), vec![4.0]);
    }

    #[test]
    fn spacing_table_lookup() {
        let mut table = HashMap::new();
        table.insert("ct-1".to_string(), (0.5, 0.7));
        assert_eq!(table.pixel_spacing("ct-1"), Some((0.5, 0.7)));
        assert_eq!(table.pixel_spacing("missing"), None);
    }
}
