use tracing::debug;

use crate::core::{
    CategoryWindow, ChartModel, PixelPoint, PlotArea, ResolvedRange, ValueFormatter, Viewport,
};
use crate::error::ChartResult;
use crate::interaction::{GestureState, InteractionOutcome, ViewportState};
use crate::render::Renderer;

use super::{ChartEngine, ChartEngineConfig, ChartLayout, PluginEvent, TooltipBox};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn model(&self) -> &ChartModel {
        &self.core.model
    }

    /// Replaces the chart data.
    ///
    /// The scroll offset is kept but clamped into the new scroll range, and a
    /// tooltip pointing past the new categories is hidden.
    pub fn set_model(&mut self, model: ChartModel) -> ChartResult<()> {
        model.validate()?;
        let categories_len = model.categories.len();
        let series_len = model.series.len();
        self.core.model = model;
        self.sync_interaction_layout()?;
        debug!(categories_len, series_len, "chart model updated");
        self.emit_plugin_event(PluginEvent::ModelUpdated {
            categories_len,
            series_len,
        });
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.core.config
    }

    pub fn set_config(&mut self, config: ChartEngineConfig) -> ChartResult<()> {
        config.validate()?;
        self.core
            .interaction
            .set_enable_scroll(config.enable_scroll);
        self.renderer.set_viewport_config(config.viewport);
        self.core.config = config;
        self.sync_interaction_layout()?;
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.config.viewport.viewport
    }

    /// Resizes the logical surface; scroll state follows the new item width.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        let mut config = self.core.config.clone();
        config.viewport.viewport = viewport;
        self.set_config(config)
    }

    /// Installs a host formatter for axis labels and numeric tooltip values.
    pub fn set_value_formatter(&mut self, formatter: ValueFormatter) {
        self.core.value_formatter = Some(formatter);
    }

    pub fn clear_value_formatter(&mut self) {
        self.core.value_formatter = None;
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.core.interaction.viewport_state()
    }

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.core.interaction.gesture()
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.core.interaction.scroll_offset()
    }

    #[must_use]
    pub fn active_tooltip_index(&self) -> Option<usize> {
        self.core.interaction.active_tooltip_index()
    }

    pub fn plot_area(&self) -> ChartResult<PlotArea> {
        PlotArea::from_viewport(self.core.config.viewport.viewport, self.core.config.padding)
    }

    /// Geometry of the next frame.
    pub fn layout(&self) -> ChartResult<ChartLayout> {
        ChartLayout::compute(
            &self.core.model,
            &self.core.config,
            self.core.interaction.scroll_offset(),
            self.core.value_formatter.clone(),
        )
    }

    pub fn resolved_range(&self) -> ChartResult<ResolvedRange> {
        Ok(self.layout()?.range)
    }

    /// Maps a data point to logical pixels with the current scroll offset.
    pub fn map_to_pixel(&self, index: usize, value: f64) -> ChartResult<PixelPoint> {
        self.layout()?.mapper.to_pixel(index, value)
    }

    /// Nearest category under `x`, or `None` outside the data.
    #[must_use]
    pub fn hit_test(&self, x: f64) -> Option<usize> {
        self.core.interaction.hit_test(x)
    }

    /// Tooltip box for the active index, measured with the renderer's fonts.
    pub fn tooltip_box(&self) -> ChartResult<Option<TooltipBox>> {
        let Some(index) = self.core.interaction.active_tooltip_index() else {
            return Ok(None);
        };
        if !self.core.model.is_renderable() {
            return Ok(None);
        }
        let layout = self.layout()?;
        let config = &self.core.config;
        Ok(TooltipBox::layout(
            index,
            &self.core.model,
            &layout,
            &config.render_style,
            &config.tooltip_style,
            &self.renderer,
            f64::from(config.viewport.viewport.width),
        ))
    }

    pub(super) fn sync_interaction_layout(&mut self) -> ChartResult<InteractionOutcome> {
        let plot = self.plot_area()?;
        let window = CategoryWindow::new(
            self.core.model.categories.len(),
            self.core.config.item_count,
            plot.width,
        );
        let outcome = self.core.interaction.sync_layout(window, plot);
        self.emit_outcome_events(outcome);
        Ok(outcome)
    }
}
