use crate::core::range::ResolvedRange;
use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Linear value axis mapped onto an inverted (downward-growing) pixel Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    pub fn from_range(range: &ResolvedRange) -> ChartResult<Self> {
        Self::new(range.min, range.max)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Domain start sits on the plot bottom, domain end on the plot top.
    pub fn value_to_pixel_y(self, value: f64, plot: PlotArea) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(plot.bottom() - normalized * plot.height)
    }

    pub fn pixel_y_to_value(self, pixel: f64, plot: PlotArea) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (plot.bottom() - pixel) / plot.height;
        Ok(self.domain_start + normalized * span)
    }
}
