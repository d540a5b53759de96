use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartPlugin;
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Adds a host observer. Ids must be non-empty and unique per chart.
    ///
    /// Plugins receive events in registration order.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        match plugin.id() {
            "" => {
                return Err(ChartError::InvalidData(
                    "plugin id must not be empty".to_owned(),
                ));
            }
            id if self.has_plugin(id) => {
                return Err(ChartError::InvalidData(format!(
                    "plugin `{id}` is already registered on this chart"
                )));
            }
            id => debug!(plugin = id, "plugin registered"),
        }
        self.core.plugins.push(plugin);
        Ok(())
    }

    /// Removes the plugin with `plugin_id`; `false` when none was registered.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        let before = self.core.plugins.len();
        self.core.plugins.retain(|plugin| plugin.id() != plugin_id);
        let removed = self.core.plugins.len() != before;
        if removed {
            debug!(plugin = plugin_id, "plugin unregistered");
        }
        removed
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.core.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugin_ids().any(|id| id == plugin_id)
    }

    /// Registered plugin ids in dispatch order.
    pub fn plugin_ids(&self) -> impl Iterator<Item = &str> {
        self.core.plugins.iter().map(|plugin| plugin.id())
    }
}
