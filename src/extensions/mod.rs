//! Host-facing hooks that observe the engine without touching its internals.

mod haptics;
mod plugins;

pub use haptics::{HAPTIC_PLUGIN_ID, HapticFeedback};
pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
