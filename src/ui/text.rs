//! Stats label text and placement

use crate::domain::core::{Point, Rect};
use crate::domain::image::PixelSpacing;
use crate::domain::measurement::CachedStats;
use crate::host::TextStyle;

/// Formats a number with a fixed number of decimals and thousands separators
pub fn format_with_commas(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Avoid printing "-0.00"
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Label lines for a measurement's statistics
///
/// Intensities carry `HU` on CT images; area is in mm² on calibrated
/// images and px² otherwise.
pub fn stats_lines(stats: &CachedStats, spacing: PixelSpacing, modality: Option<&str>) -> Vec<String> {
    let intensity_unit = match modality {
        Some(m) if m.eq_ignore_ascii_case("CT") => " HU",
        _ => "",
    };
    let area_unit = if spacing.calibrated { "mm²" } else { "px²" };

    vec![
        format!("Mean: {}{}", format_with_commas(stats.mean, 2), intensity_unit),
        format!("Std Dev: {}{}", format_with_commas(stats.std_dev, 2), intensity_unit),
        format!("Area: {} {}", format_with_commas(stats.area, 2), area_unit),
    ]
}

/// Approximate canvas extent of a text block
pub fn estimate_extent(lines: &[String], style: &TextStyle) -> (f64, f64) {
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = longest as f64 * style.font_size as f64 * 0.6 + 2.0 * style.padding as f64;
    let height = lines.len() as f64 * style.font_size as f64 * 1.2 + 2.0 * style.padding as f64;
    (width, height)
}

/// Side of the rectangle the label attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSide {
    Right,
    Bottom,
    Left,
    Top,
}

impl AnchorSide {
    /// Side that keeps the label next to the same image edge it started on
    ///
    /// At creation the label sits on the right; each quarter turn of the
    /// viewport since then moves it one side clockwise.
    pub fn for_rotation(rotation: f64, initial_rotation: f64) -> Self {
        let relative = (rotation - initial_rotation).rem_euclid(360.0);
        match relative {
            r if r < 90.0 => AnchorSide::Right,
            r if r < 180.0 => AnchorSide::Bottom,
            r if r < 270.0 => AnchorSide::Left,
            _ => AnchorSide::Top,
        }
    }
}

/// Top-left canvas corner of an automatically placed label
///
/// `offset.x` pushes the label away from the rectangle, `offset.y` shifts it
/// along the attached side.
pub fn auto_anchor(bounds: &Rect, side: AnchorSide, extent: (f64, f64), offset: Point) -> Point {
    let (w, h) = extent;
    let c = bounds.center();
    match side {
        AnchorSide::Right => Point::new(bounds.right() + offset.x, c.y - h / 2.0 + offset.y),
        AnchorSide::Left => Point::new(bounds.x - offset.x - w, c.y - h / 2.0 + offset.y),
        AnchorSide::Bottom => Point::new(c.x - w / 2.0 + offset.y, bounds.bottom() + offset.x),
        AnchorSide::Top => Point::new(c.x - w / 2.0 + offset.y, bounds.y - offset.x - h),
    }
}

/// Closest pair of edge midpoints between the shape outline and the label box
pub fn link_endpoints(outline: &[Point; 4], label: &Rect) -> (Point, Point) {
    let midpoints = |corners: &[Point; 4]| -> [Point; 4] {
        [0, 1, 2, 3].map(|i| corners[i].midpoint(corners[(i + 1) % 4]))
    };
    let from = midpoints(outline);
    let to = midpoints(&label.corners());

    let mut best = (from[0], to[0]);
    let mut best_distance = f64::INFINITY;
    for a in from {
        for b in to {
            let d = a.distance_to(b);
            if d < best_distance {
                best_distance = d;
                best = (a, b);
            }
        }
    }
    best
}
