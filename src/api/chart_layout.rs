use crate::core::{
    CategoryWindow, ChartModel, CoordinateMapper, PlotArea, ResolvedRange, ValueFormatter,
    ValueLabeler, resolve_range,
};
use crate::error::ChartResult;

use super::ChartEngineConfig;

/// Geometry resolved for one draw pass: plot box, value range, x window and
/// the label formatter that goes with the range.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub plot: PlotArea,
    pub range: ResolvedRange,
    pub mapper: CoordinateMapper,
    pub labeler: ValueLabeler,
}

impl ChartLayout {
    pub fn compute(
        model: &ChartModel,
        config: &ChartEngineConfig,
        scroll_offset: f64,
        formatter: Option<ValueFormatter>,
    ) -> ChartResult<Self> {
        let plot = PlotArea::from_viewport(config.viewport.viewport, config.padding)?;
        let range = resolve_range(&model.series, &model.y_axis);
        let window = CategoryWindow::new(model.categories.len(), config.item_count, plot.width);
        let mapper = CoordinateMapper::new(plot, window, &range, scroll_offset)?;
        let labeler = ValueLabeler::for_range(&range, model.scientific).with_custom(formatter);
        Ok(Self {
            plot,
            range,
            mapper,
            labeler,
        })
    }

    #[must_use]
    pub fn window(&self) -> CategoryWindow {
        self.mapper.window()
    }
}
