use crate::core::range::ResolvedRange;
use crate::core::scale::LinearScale;
use crate::core::types::{PixelPoint, PlotArea};
use crate::core::windowing::CategoryWindow;
use crate::error::ChartResult;

/// Data space (category index, value) to logical pixel space for one frame.
///
/// Built from immutable inputs and holds no state between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    plot: PlotArea,
    window: CategoryWindow,
    scale: LinearScale,
    scroll_offset: f64,
}

impl CoordinateMapper {
    pub fn new(
        plot: PlotArea,
        window: CategoryWindow,
        range: &ResolvedRange,
        scroll_offset: f64,
    ) -> ChartResult<Self> {
        Ok(Self {
            plot,
            window,
            scale: LinearScale::from_range(range)?,
            scroll_offset: window.clamp_scroll(scroll_offset),
        })
    }

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn window(&self) -> CategoryWindow {
        self.window
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    #[must_use]
    pub fn scroll_start_index(&self) -> usize {
        self.window.scroll_start_index(self.scroll_offset)
    }

    #[must_use]
    pub fn x_for_index(&self, index: usize) -> f64 {
        self.window
            .slot_center_x(index, self.scroll_offset, self.plot)
    }

    pub fn y_for_value(&self, value: f64) -> ChartResult<f64> {
        self.scale.value_to_pixel_y(value, self.plot)
    }

    pub fn to_pixel(&self, index: usize, value: f64) -> ChartResult<PixelPoint> {
        Ok(PixelPoint::new(self.x_for_index(index), self.y_for_value(value)?))
    }

    #[must_use]
    pub fn hit_test(&self, x: f64) -> Option<usize> {
        self.window.hit_test(x, self.scroll_offset, self.plot)
    }
}
