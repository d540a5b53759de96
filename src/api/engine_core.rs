use crate::core::{ChartModel, ValueFormatter};
use crate::extensions::ChartPlugin;
use crate::interaction::InteractionController;

use super::ChartEngineConfig;

/// Internal engine core state used by the public facade (`ChartEngine`).
pub(super) struct EngineCore {
    pub(super) config: ChartEngineConfig,
    pub(super) model: ChartModel,
    pub(super) interaction: InteractionController,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) value_formatter: Option<ValueFormatter>,
}
