use tracing::debug;

use crate::core::ChartModel;
use crate::error::ChartResult;
use crate::interaction::InteractionController;
use crate::render::Renderer;

use super::{ChartEngine, ChartEngineConfig, engine_core::EngineCore};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with an empty model.
    pub fn new(mut renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        debug!(
            width = config.viewport.viewport.width,
            height = config.viewport.viewport.height,
            pixel_ratio = config.viewport.pixel_ratio,
            "chart engine created"
        );
        let interaction = InteractionController::new(config.enable_scroll);
        renderer.set_viewport_config(config.viewport);
        let mut engine = Self {
            renderer,
            core: EngineCore {
                config,
                model: ChartModel::default(),
                interaction,
                plugins: Vec::new(),
                value_formatter: None,
            },
        };
        engine.sync_interaction_layout()?;
        Ok(engine)
    }

    /// Creates an engine and installs `model` in one step.
    pub fn with_model(renderer: R, config: ChartEngineConfig, model: ChartModel) -> ChartResult<Self> {
        let mut engine = Self::new(renderer, config)?;
        engine.set_model(model)?;
        Ok(engine)
    }
}
