use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::interaction::{GestureState, ViewportState};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub scroll: ViewportState,
    pub gesture: GestureState,
    pub categories_len: usize,
    pub series_len: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    ModelUpdated {
        categories_len: usize,
        series_len: usize,
    },
    Scrolled {
        offset_px: f64,
    },
    /// The hit-tested category changed; fired once per new index.
    TooltipIndexChanged {
        index: usize,
    },
    TooltipHidden,
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read engine context without mutating core
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
