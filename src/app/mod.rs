//! Tool orchestration layer
//!
//! Ties the domain operations to the host collaborators and owns the
//! measurement lifecycle state.

pub mod state;
pub mod tool;

pub use state::{MeasurementState, StateEvent, StateMachine};
pub use tool::{RectangleRoiTool, RenderContext, RenderEvent, RenderReport, ToolError};
