//! Rectangle region-of-interest measurement for interactive image viewers
//!
//! A measurement is a rectangle drawn over a raster image. This crate
//! creates measurements from pointer input, hit-tests the pointer against
//! them, and computes area, mean intensity and standard deviation of the
//! enclosed pixels in physical units. Rendering, pixel access, metadata and
//! the per-view measurement list are supplied by the host through the
//! traits in [`host`].

pub mod app;
pub mod config;
pub mod domain;
pub mod host;
pub mod logging;
pub mod ui;

#[cfg(test)]
mod test_utils;

pub use app::{RectangleRoiTool, RenderContext, RenderEvent, RenderReport, ToolError};
pub use config::ToolConfig;
pub use domain::core::Point;
pub use domain::factory::EventData;
pub use domain::image::Image;
pub use domain::measurement::{CachedStats, HandleKind, Measurement};
