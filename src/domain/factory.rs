//! Measurement creation from pointer-down input
//!
//! Event payloads come from the host and may be incomplete, so every field
//! is optional here and validated before a measurement is built.

use thiserror::Error;

use crate::domain::core::Point;
use crate::domain::measurement::Measurement;

/// Pointer positions carried by an input event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurrentPoints {
    /// Pointer position in image coordinates
    pub image: Option<Point>,
    /// Pointer position on the canvas
    pub canvas: Option<Point>,
}

/// Viewport state at the time of the event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    /// Rotation in degrees
    pub rotation: Option<f64>,
}

/// Raw input event as delivered by the host viewer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventData {
    pub current_points: Option<CurrentPoints>,
    pub viewport: Option<ViewportState>,
}

impl EventData {
    /// Well-formed event at an image position with the given viewport rotation
    pub fn at_image_point(x: f64, y: f64, rotation: f64) -> Self {
        Self {
            current_points: Some(CurrentPoints {
                image: Some(Point::new(x, y)),
                canvas: None,
            }),
            viewport: Some(ViewportState {
                rotation: Some(rotation),
            }),
        }
    }
}

/// Reasons an event cannot produce a measurement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactoryError {
    #[error("required eventData not supplied to tool {tool}: missing {field}")]
    MissingField { tool: String, field: &'static str },

    #[error("required eventData not supplied to tool {tool}: {field} is not a finite number")]
    NonFinite { tool: String, field: &'static str },
}

/// Validated subset of an event needed to seed a measurement
#[derive(Debug, Clone, Copy, PartialEq)]
struct Seed {
    image_point: Point,
    rotation: f64,
}

fn validate(tool: &str, event: &EventData) -> Result<Seed, FactoryError> {
    let missing = |field| FactoryError::MissingField {
        tool: tool.to_string(),
        field,
    };

    let image_point = event
        .current_points
        .ok_or_else(|| missing("currentPoints"))?
        .image
        .ok_or_else(|| missing("currentPoints.image"))?;
    let rotation = event
        .viewport
        .ok_or_else(|| missing("viewport"))?
        .rotation
        .ok_or_else(|| missing("viewport.rotation"))?;

    if !image_point.is_finite() {
        return Err(FactoryError::NonFinite {
            tool: tool.to_string(),
            field: "currentPoints.image",
        });
    }
    if !rotation.is_finite() {
        return Err(FactoryError::NonFinite {
            tool: tool.to_string(),
            field: "viewport.rotation",
        });
    }

    Ok(Seed {
        image_point,
        rotation,
    })
}

/// Builds a degenerate rectangle at the pointer position
///
/// The text box starts unplaced (`has_moved = false`); the renderer anchors
/// it next to the rectangle using the configured offset.
pub fn create_measurement(tool: &str, event: &EventData) -> Result<Measurement, FactoryError> {
    let seed = validate(tool, event)?;
    Ok(Measurement::at_point(seed.image_point, seed.rotation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_sit_at_pointer() {
        let event = EventData::at_image_point(12.5, 7.0, 0.0);
        let m = create_measurement("RectangleRoi", &event).unwrap();
        let (start, end) = m.handles().corners().unwrap();
        assert_eq!(start, Point::new(12.5, 7.0));
        assert_eq!(end, start);
        assert!(m.visible);
        assert!(m.is_invalidated());
        assert!(m.cached_stats().is_none());
    }

    #[test]
    fn initial_rotation_comes_from_viewport() {
        let event = EventData::at_image_point(0.0, 0.0, 270.0);
        let m = create_measurement("RectangleRoi", &event).unwrap();
        assert_eq!(m.handles().initial_rotation, 270.0);
    }

    #[test]
    fn missing_fields_are_reported() {
        let err = create_measurement("RectangleRoi", &EventData::default()).unwrap_err();
        assert_eq!(
            err,
            FactoryError::MissingField {
                tool: "RectangleRoi".into(),
                field: "currentPoints"
            }
        );
        assert!(err.to_string().contains("required eventData not supplied to tool"));

        let mut no_rotation = EventData::at_image_point(1.0, 1.0, 0.0);
        no_rotation.viewport = Some(ViewportState { rotation: None });
        let err = create_measurement("RectangleRoi", &no_rotation).unwrap_err();
        assert!(err.to_string().contains("viewport.rotation"));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let event = EventData::at_image_point(f64::NAN, 0.0, 0.0);
        let err = create_measurement("RectangleRoi", &event).unwrap_err();
        assert!(matches!(err, FactoryError::NonFinite { .. }));
        assert!(err.to_string().contains("required eventData not supplied"));
    }
}
