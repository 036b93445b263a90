//! Region statistics for rectangle measurements
//!
//! Area comes from the raw handle coordinates scaled by physical pixel
//! spacing; mean and standard deviation come from a single pass over the
//! integer pixel window the rectangle covers.

use thiserror::Error;

use crate::domain::core::Point;
use crate::domain::image::{Image, PixelBox, PixelSpacing, valid_spacing};
use crate::domain::measurement::{CachedStats, Measurement};
use crate::host::{MetaDataProvider, PixelAccessor};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("invalid parameters supplied to tool {tool}: measurement has no {missing} handle")]
    InvalidParameters { tool: String, missing: &'static str },
}

/// Running sums for one pass over the samples
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accumulator {
    pub count: usize,
    pub sum: f64,
    pub sum_of_squares: f64,
}

impl Accumulator {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_of_squares += value * value;
    }

    /// Mean of the samples, 0 when empty
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Population standard deviation, 0 for fewer than two samples
    ///
    /// Rounding can push the variance slightly below zero for constant
    /// input, so it is floored at zero before the square root.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let variance = (self.sum_of_squares - self.sum * self.sum / n) / n;
        variance.max(0.0).sqrt()
    }
}

impl FromIterator<f64> for Accumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Accumulator::default();
        for value in iter {
            acc.push(value);
        }
        acc
    }
}

/// Resolves pixel spacing per axis: image field, then metadata, then 1
///
/// The result is calibrated only when both axes found a real value.
pub fn resolve_spacing(image: &Image, metadata: Option<&dyn MetaDataProvider>) -> PixelSpacing {
    let from_meta = metadata.and_then(|provider| provider.pixel_spacing(&image.image_id));
    let row = valid_spacing(image.row_pixel_spacing)
        .or_else(|| valid_spacing(from_meta.map(|(row, _)| row)));
    let column = valid_spacing(image.column_pixel_spacing)
        .or_else(|| valid_spacing(from_meta.map(|(_, column)| column)));
    PixelSpacing::resolve(row, column)
}

/// Physical area of the rectangle spanned by two raw handle positions
pub fn physical_area(start: Point, end: Point, spacing: PixelSpacing) -> f64 {
    (end.x - start.x).abs() * spacing.column * (end.y - start.y).abs() * spacing.row
}

/// Computes statistics without touching the measurement
pub fn compute_stats(
    start: Point,
    end: Point,
    image: &Image,
    pixels: &dyn PixelAccessor,
    spacing: PixelSpacing,
) -> CachedStats {
    let window = PixelBox::from_handles(start, end, image.columns, image.rows);
    let acc: Accumulator = if window.is_empty() {
        Accumulator::default()
    } else {
        pixels.samples(image, window).into_iter().collect()
    };

    CachedStats {
        area: physical_area(start, end, spacing),
        mean: acc.mean(),
        std_dev: acc.std_dev(),
    }
}

/// Recomputes and stores a measurement's statistics, clearing its stale flag
///
/// The three values are written together; on error the measurement is left
/// untouched.
pub fn update_cached_stats(
    tool: &str,
    image: &Image,
    pixels: &dyn PixelAccessor,
    metadata: Option<&dyn MetaDataProvider>,
    measurement: &mut Measurement,
) -> Result<CachedStats, StatsError> {
    let invalid = |missing| StatsError::InvalidParameters {
        tool: tool.to_string(),
        missing,
    };
    let start = measurement.handles().start.ok_or_else(|| invalid("start"))?;
    let end = measurement.handles().end.ok_or_else(|| invalid("end"))?;

    let spacing = resolve_spacing(image, metadata);
    let stats = compute_stats(start.point(), end.point(), image, pixels, spacing);
    measurement.commit_stats(stats);
    Ok(stats)
}
