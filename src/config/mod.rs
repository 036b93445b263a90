//! Configuration module for the rectangle ROI tool
//!
//! Plain data with sanitising helpers; the host builds a `ToolConfig`
//! once and hands it to `RectangleRoiTool`.

pub mod tool;

pub use tool::{HitGeometry, InteractionKind, ToolConfig};
