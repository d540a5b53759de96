use tracing::trace;

use crate::extensions::PluginContext;
use crate::interaction::InteractionOutcome;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.core.config.viewport.viewport,
            scroll: self.core.interaction.viewport_state(),
            gesture: self.core.interaction.gesture(),
            categories_len: self.core.model.categories.len(),
            series_len: self.core.model.series.len(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.core.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(?event, plugins = self.core.plugins.len(), "dispatching plugin event");
        for plugin in &mut self.core.plugins {
            plugin.on_event(event, context);
        }
    }

    /// Fans one interaction outcome out as plugin events.
    pub(super) fn emit_outcome_events(&mut self, outcome: InteractionOutcome) {
        if outcome.scroll_changed {
            self.emit_plugin_event(PluginEvent::Scrolled {
                offset_px: self.core.interaction.scroll_offset(),
            });
        }
        if outcome.index_changed {
            if let Some(index) = outcome.tooltip_index {
                self.emit_plugin_event(PluginEvent::TooltipIndexChanged { index });
            }
        }
        if outcome.tooltip_hidden {
            self.emit_plugin_event(PluginEvent::TooltipHidden);
        }
    }
}
