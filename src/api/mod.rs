mod chart_layout;
mod chart_options;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod interaction_coordinator;
mod plugin_dispatch;
mod plugin_registry;
mod render_coordinator;
mod render_frame_builder;
mod series_frame_builder;
mod tooltip_presenter;

pub use crate::extensions::PluginEvent;
pub use chart_layout::ChartLayout;
pub use chart_options::ChartOptions;
pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, LineMode, Palette, RenderStyle, TooltipStyle};
pub use tooltip_presenter::{TooltipBox, TooltipRow};
