mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod recording_surface;
mod surface;
mod text_metrics;

pub use frame::{LayerCommands, RenderFrame};
pub use layer_stack::CanvasLayerKind;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, DrawCommand, LinePrimitive, PathPrimitive, PathSegment,
    RectPrimitive, TextBaseline, TextHAlign, TextPrimitive,
};
pub use recording_surface::{RecordingSurface, SurfaceCall};
pub use surface::{CanvasRenderer, ChartSurface, DrawingSurface};
pub use text_metrics::{EstimatedTextMetrics, TextMeasurer};

use crate::core::ViewportConfig;
use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
/// Layout that depends on text width (tooltip box, legend) asks the backend
/// through [`TextMeasurer`] before the frame is built.
pub trait Renderer: TextMeasurer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Called whenever the engine adopts a new surface geometry.
    fn set_viewport_config(&mut self, _config: ViewportConfig) {}
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
