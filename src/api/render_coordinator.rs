use tracing::trace;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn render<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<bool> {
        if !engine.core.model.is_renderable() {
            trace!("render skipped: no categories or series");
            return Ok(false);
        }
        let frame = engine.build_render_frame()?;
        frame.validate()?;
        engine.renderer.render(&frame)?;
        trace!(commands = frame.command_count(), "chart rendered");
        engine.emit_plugin_event(PluginEvent::Rendered);
        Ok(true)
    }
}
