use std::fmt;

use crate::extensions::{ChartPlugin, PluginContext, PluginEvent};

pub const HAPTIC_PLUGIN_ID: &str = "haptic-feedback";

/// Calls a host closure whenever the tooltip moves to a new category.
///
/// Meant for short device vibrations; the closure must return promptly.
pub struct HapticFeedback {
    id: String,
    callback: Box<dyn FnMut(usize)>,
}

impl HapticFeedback {
    #[must_use]
    pub fn new(callback: impl FnMut(usize) + 'static) -> Self {
        Self {
            id: HAPTIC_PLUGIN_ID.to_owned(),
            callback: Box::new(callback),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl fmt::Debug for HapticFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HapticFeedback").field("id", &self.id).finish()
    }
}

impl ChartPlugin for HapticFeedback {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: PluginEvent, _context: PluginContext) {
        if let PluginEvent::TooltipIndexChanged { index } = event {
            (self.callback)(index);
        }
    }
}
