use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::color::Color;
use crate::error::{ChartError, ChartResult};

/// Dash pattern in logical pixels (`on, off, ...`). Empty means solid.
pub type DashPattern = SmallVec<[f64; 4]>;

pub const DEFAULT_SPLIT_NUMBER: usize = 4;

/// One plotted line: finite values aligned to the chart categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_data: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data,
            display_data: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_display_data(mut self, display: Vec<String>) -> Self {
        self.display_data = Some(display);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Preserved original text at `index`, if any.
    #[must_use]
    pub fn display_at(&self, index: usize) -> Option<&str> {
        self.display_data
            .as_ref()
            .and_then(|display| display.get(index))
            .map(String::as_str)
    }

    fn validate(&self, category_count: usize) -> ChartResult<()> {
        if self.data.len() != category_count {
            return Err(ChartError::InvalidData(format!(
                "series `{}` has {} values for {category_count} categories",
                self.name,
                self.data.len()
            )));
        }
        if let Some(display) = &self.display_data {
            if display.len() != category_count {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` display data length {} does not match {category_count} categories",
                    self.name,
                    display.len()
                )));
            }
        }
        if self.data.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` contains non-finite values",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    Solid,
    #[default]
    Dashed,
    None,
}

/// Y-axis request. Explicit `ticks` win over `split_number` auto-division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisConfig {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub ticks: Option<Vec<f64>>,
    #[serde(default)]
    pub split_number: Option<usize>,
    #[serde(default)]
    pub grid_style: GridStyle,
}

impl Default for YAxisConfig {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            ticks: None,
            split_number: None,
            grid_style: GridStyle::Dashed,
        }
    }
}

impl YAxisConfig {
    #[must_use]
    pub fn split_number(&self) -> usize {
        self.split_number
            .filter(|split| *split > 0)
            .unwrap_or(DEFAULT_SPLIT_NUMBER)
    }

    #[must_use]
    pub fn has_explicit_ticks(&self) -> bool {
        self.ticks.as_ref().is_some_and(|ticks| !ticks.is_empty())
    }

    fn validate(&self) -> ChartResult<()> {
        for (label, value) in [("min", self.min), ("max", self.max)] {
            if value.is_some_and(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "y-axis {label} must be finite"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if max <= min {
                return Err(ChartError::InvalidData(format!(
                    "y-axis max ({max}) must be greater than min ({min})"
                )));
            }
        }
        Ok(())
    }
}

/// Horizontal reference line at a fixed data-space value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    #[serde(alias = "y")]
    pub value: f64,
    #[serde(default = "default_guide_color")]
    pub color: Color,
    #[serde(default = "default_guide_width")]
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<DashPattern>,
}

fn default_guide_color() -> Color {
    Color::hex(0xDC2626)
}

fn default_guide_width() -> f64 {
    1.0
}

impl GuideLine {
    #[must_use]
    pub fn solid(value: f64, color: Color) -> Self {
        Self {
            value,
            color,
            width: default_guide_width(),
            dash: None,
        }
    }

    #[must_use]
    pub fn dashed(value: f64, color: Color, dash: &[f64]) -> Self {
        Self {
            dash: Some(SmallVec::from_slice(dash)),
            ..Self::solid(value, color)
        }
    }
}

/// Horizontal band painted behind the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_region_color")]
    pub color: Color,
}

fn default_region_color() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.1)
}

impl Region {
    #[must_use]
    pub fn new(min: f64, max: f64, color: Color) -> Self {
        Self { min, max, color }
    }
}

/// Normal-range band. Without `min` the safe zone reaches down to the plot bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeRegion {
    #[serde(default)]
    pub min: Option<f64>,
    pub max: f64,
    #[serde(default)]
    pub color: Option<Color>,
}

/// Everything needed to draw one chart, rebuilt on every data refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    #[serde(default)]
    pub y_axis: YAxisConfig,
    #[serde(default)]
    pub scientific: bool,
    #[serde(default)]
    pub guide_lines: Vec<GuideLine>,
    #[serde(default)]
    pub background_regions: Vec<Region>,
    #[serde(default)]
    pub safe_region: Option<SafeRegion>,
}

impl ChartModel {
    #[must_use]
    pub fn new(categories: Vec<String>, series: Vec<Series>) -> Self {
        Self {
            categories,
            series,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_y_axis(mut self, y_axis: YAxisConfig) -> Self {
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_scientific(mut self, scientific: bool) -> Self {
        self.scientific = scientific;
        self
    }

    #[must_use]
    pub fn with_guide_line(mut self, guide: GuideLine) -> Self {
        self.guide_lines.push(guide);
        self
    }

    #[must_use]
    pub fn with_background_region(mut self, region: Region) -> Self {
        self.background_regions.push(region);
        self
    }

    #[must_use]
    pub fn with_safe_region(mut self, region: SafeRegion) -> Self {
        self.safe_region = Some(region);
        self
    }

    /// `false` while there is nothing to draw; the renderer skips the pass.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !self.categories.is_empty() && !self.series.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        for series in &self.series {
            series.validate(self.categories.len())?;
        }
        self.y_axis.validate()?;
        for guide in &self.guide_lines {
            if !guide.value.is_finite() || !guide.width.is_finite() || guide.width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "guide lines need a finite value and a positive width".to_owned(),
                ));
            }
        }
        for region in &self.background_regions {
            if !region.min.is_finite() || !region.max.is_finite() {
                return Err(ChartError::InvalidData(
                    "background region bounds must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }
}
