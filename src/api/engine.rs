use crate::error::ChartResult;
use crate::render::Renderer;

use super::{engine_core::EngineCore, render_coordinator::RenderCoordinator};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns one chart: its model, scroll/tooltip state, plugins
/// and the renderer frames are handed to. Charts never share state.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    /// Clears and redraws the whole chart.
    ///
    /// Returns `Ok(false)` without touching the renderer while there are no
    /// categories or series yet.
    pub fn render(&mut self) -> ChartResult<bool> {
        RenderCoordinator::render(self)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
