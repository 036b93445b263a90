//! The rectangle ROI tool as seen by the host viewer
//!
//! Each public operation has a `try_*` form that returns a typed error and a
//! plain form that logs the error through the injected `Logger` and returns a
//! safe default, so a single malformed measurement never interrupts the
//! host's event loop.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::app::state::MeasurementState;
use crate::config::{InteractionKind, ToolConfig};
use crate::domain::core::Point;
use crate::domain::factory::{EventData, FactoryError, create_measurement};
use crate::domain::hit_test::{self, HitMode, HitOptions, HitTestError};
use crate::domain::image::Image;
use crate::domain::measurement::{HandleKind, Measurement};
use crate::domain::statistics::{self, StatsError};
use crate::host::{
    CanvasTransform, DrawingSurface, Logger, MeasurementStore, MetaDataProvider, PixelAccessor,
    SurfaceId,
};
use crate::logging::TracingLogger;
use crate::ui::renderer::RoiLayout;
use crate::ui::text::stats_lines;

/// Errors surfaced by the tool's fallible operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error(transparent)]
    Factory(#[from] FactoryError),

    #[error(transparent)]
    HitTest(#[from] HitTestError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("invalid parameters supplied to tool {tool}: measurement has no {missing} handle to lay out")]
    Layout { tool: String, missing: &'static str },
}

/// Host services needed to map, sample and describe one rendering surface
///
/// The viewport rotation used for label placement is read from `transform`.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub transform: &'a dyn CanvasTransform,
    pub pixels: &'a dyn PixelAccessor,
    pub metadata: Option<&'a dyn MetaDataProvider>,
}

/// A redraw request for one surface
#[derive(Clone, Copy)]
pub struct RenderEvent<'a> {
    pub surface: SurfaceId,
    pub image: &'a Image,
    pub context: RenderContext<'a>,
}

/// Outcome of a render pass over a surface's measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// Measurements drawn
    pub drawn: usize,
    /// Measurements whose statistics were recomputed first
    pub refreshed: usize,
    /// Visible measurements skipped because of invalid geometry
    pub skipped: usize,
}

/// Rectangle region-of-interest measurement tool
pub struct RectangleRoiTool {
    config: ToolConfig,
    logger: Arc<dyn Logger>,
}

impl Default for RectangleRoiTool {
    fn default() -> Self {
        Self::new()
    }
}

impl RectangleRoiTool {
    /// Tool with default configuration logging through `tracing`
    pub fn new() -> Self {
        Self::with_config(ToolConfig::default())
    }

    pub fn with_config(config: ToolConfig) -> Self {
        let logger = Arc::new(TracingLogger::new(config.name.clone()));
        Self { config, logger }
    }

    /// Replaces the log channel
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    fn report(&self, err: &ToolError) {
        match err {
            ToolError::Factory(_) => self.logger.error(&err.to_string()),
            ToolError::HitTest(_) | ToolError::Stats(_) | ToolError::Layout { .. } => {
                self.logger.warn(&err.to_string())
            }
        }
    }

    /// Builds a degenerate measurement at the pointer-down position
    pub fn try_create_new_measurement(&self, event: &EventData) -> Result<Measurement, ToolError> {
        Ok(create_measurement(self.name(), event)?)
    }

    /// Like `try_create_new_measurement`, logging an error and returning `None` on bad input
    pub fn create_new_measurement(&self, event: &EventData) -> Option<Measurement> {
        self.try_create_new_measurement(event)
            .inspect_err(|err| self.report(err))
            .ok()
    }

    /// Hit test with explicit mode and input device
    pub fn try_point_near_tool(
        &self,
        context: &RenderContext<'_>,
        measurement: Option<&Measurement>,
        point: Point,
        mode: HitMode,
        interaction: InteractionKind,
    ) -> Result<bool, ToolError> {
        let options = HitOptions {
            tolerance: self.config.tolerance_for(interaction),
            mode,
            geometry: self.config.hit_geometry,
        };
        Ok(hit_test::point_near_tool(
            self.name(),
            context.transform,
            measurement,
            point,
            options,
        )?)
    }

    /// True if a mouse pointer at `point` (canvas) is near the measurement's outline
    ///
    /// Returns `false` for absent or hidden measurements, and logs a warning for
    /// measurements missing a corner handle.
    pub fn point_near_tool(
        &self,
        context: &RenderContext<'_>,
        measurement: Option<&Measurement>,
        point: Point,
    ) -> bool {
        self.point_near_tool_with(context, measurement, point, HitMode::Outline, InteractionKind::Mouse)
    }

    pub fn point_near_tool_with(
        &self,
        context: &RenderContext<'_>,
        measurement: Option<&Measurement>,
        point: Point,
        mode: HitMode,
        interaction: InteractionKind,
    ) -> bool {
        self.try_point_near_tool(context, measurement, point, mode, interaction)
            .inspect_err(|err| self.report(err))
            .unwrap_or(false)
    }

    /// The handle under a canvas point, for starting a drag
    pub fn handle_near_point(
        &self,
        context: &RenderContext<'_>,
        measurement: &Measurement,
        point: Point,
    ) -> Option<HandleKind> {
        hit_test::handle_near_point(context.transform, measurement, point, self.config.handle_radius)
    }

    /// Recomputes area, mean and standard deviation of the enclosed pixels
    ///
    /// An image without rows or columns has no pixels to sample; the stats
    /// are still stored, with a warning, and mean and std dev come out as 0.
    pub fn try_update_cached_stats(
        &self,
        image: &Image,
        context: &RenderContext<'_>,
        measurement: &mut Measurement,
    ) -> Result<(), ToolError> {
        if !image.has_extent() {
            self.logger.warn(&format!(
                "image {} has no rows or columns; tool {} sampled no pixels",
                image.image_id,
                self.name()
            ));
        }
        let stats = statistics::update_cached_stats(
            self.name(),
            image,
            context.pixels,
            context.metadata,
            measurement,
        )?;
        debug!(
            tool = %self.name(),
            area = stats.area,
            mean = stats.mean,
            std_dev = stats.std_dev,
            "refreshed cached stats"
        );
        Ok(())
    }

    /// Like `try_update_cached_stats`, logging a warning on invalid geometry
    pub fn update_cached_stats(
        &self,
        image: &Image,
        context: &RenderContext<'_>,
        measurement: &mut Measurement,
    ) {
        if let Err(err) = self.try_update_cached_stats(image, context, measurement) {
            self.report(&err);
        }
    }

    /// Draws every visible measurement registered for the event's surface
    ///
    /// Stale statistics are refreshed first. Returns `None`, without drawing,
    /// when the store has no measurements for the surface.
    pub fn render_tool_data(
        &self,
        event: &RenderEvent<'_>,
        store: &mut dyn MeasurementStore,
        canvas: &mut dyn DrawingSurface,
    ) -> Option<RenderReport> {
        let measurements = store.measurements_mut(event.surface)?;
        if measurements.is_empty() {
            return None;
        }

        let context = &event.context;
        let spacing = statistics::resolve_spacing(event.image, context.metadata);
        let mut report = RenderReport::default();

        for measurement in measurements.iter_mut().filter(|m| m.visible) {
            if MeasurementState::of(measurement).needs_refresh() {
                if let Err(err) = self.try_update_cached_stats(event.image, context, measurement) {
                    self.report(&err);
                    report.skipped += 1;
                    continue;
                }
                report.refreshed += 1;
            }

            let lines = measurement
                .cached_stats()
                .map(|stats| stats_lines(stats, spacing, event.image.modality.as_deref()))
                .unwrap_or_default();
            let Some(layout) =
                RoiLayout::from_measurement(measurement, context.transform, &self.config, lines)
            else {
                let missing = if measurement.handles().start.is_none() { "start" } else { "end" };
                self.report(&ToolError::Layout {
                    tool: self.name().to_string(),
                    missing,
                });
                report.skipped += 1;
                continue;
            };

            if let Some(bbox) = layout.draw(canvas) {
                let anchor = context
                    .transform
                    .canvas_to_image(Point::new(bbox.left, bbox.top));
                measurement.place_text_box(bbox, anchor);
            }
            report.drawn += 1;
        }

        debug!(
            tool = %self.name(),
            surface = event.surface.0,
            drawn = report.drawn,
            refreshed = report.refreshed,
            skipped = report.skipped,
            "rendered tool data"
        );
        Some(report)
    }
}
