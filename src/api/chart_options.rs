use serde::{Deserialize, Serialize};

use crate::core::{ChartModel, GridStyle, GuideLine, Region, SafeRegion, Series, YAxisConfig};
use crate::error::ChartResult;

use super::{ChartEngineConfig, LineMode};

fn default_true() -> bool {
    true
}

/// Host-facing per-chart options, in the shape page code passes them.
///
/// Splits into a [`ChartModel`] and adjustments on a [`ChartEngineConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub series: Vec<Series>,
    /// `0` or missing shows every category.
    #[serde(default)]
    pub item_count: Option<usize>,
    #[serde(default)]
    pub enable_scroll: bool,
    #[serde(default)]
    pub scientific: bool,
    #[serde(default)]
    pub y_axis_min: Option<f64>,
    #[serde(default)]
    pub y_axis_max: Option<f64>,
    #[serde(default)]
    pub y_axis_ticks: Option<Vec<f64>>,
    #[serde(default)]
    pub split_number: Option<usize>,
    #[serde(default)]
    pub grid_style: Option<GridStyle>,
    #[serde(default)]
    pub guide_lines: Vec<GuideLine>,
    #[serde(default)]
    pub background_regions: Vec<Region>,
    #[serde(default)]
    pub safe_region: Option<SafeRegion>,
    #[serde(default = "default_true")]
    pub show_background: bool,
    #[serde(default)]
    pub minimal: bool,
    #[serde(default)]
    pub line_mode: Option<LineMode>,
    #[serde(default)]
    pub show_legend: Option<bool>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            series: Vec::new(),
            item_count: None,
            enable_scroll: false,
            scientific: false,
            y_axis_min: None,
            y_axis_max: None,
            y_axis_ticks: None,
            split_number: None,
            grid_style: None,
            guide_lines: Vec::new(),
            background_regions: Vec::new(),
            safe_region: None,
            show_background: true,
            minimal: false,
            line_mode: None,
            show_legend: None,
        }
    }
}

impl ChartOptions {
    /// Parses options from JSON. Model-level checks happen in [`Self::into_parts`].
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Chart data and overlays described by these options.
    #[must_use]
    pub fn to_model(&self) -> ChartModel {
        let grid_style = if self.minimal {
            GridStyle::None
        } else {
            self.grid_style.unwrap_or_default()
        };
        ChartModel {
            categories: self.categories.clone(),
            series: self.series.clone(),
            y_axis: YAxisConfig {
                min: self.y_axis_min,
                max: self.y_axis_max,
                ticks: self.y_axis_ticks.clone(),
                split_number: self.split_number,
                grid_style,
            },
            scientific: self.scientific,
            guide_lines: self.guide_lines.clone(),
            background_regions: self.background_regions.clone(),
            safe_region: self.safe_region,
        }
    }

    /// `base` with the window, scroll and style switches of these options.
    #[must_use]
    pub fn apply_to_config(&self, base: ChartEngineConfig) -> ChartEngineConfig {
        let mut config = base
            .with_item_count(self.item_count.unwrap_or(0))
            .with_scroll(self.enable_scroll);
        let style = &mut config.render_style;
        style.show_background = self.show_background;
        style.minimal = self.minimal;
        if let Some(line_mode) = self.line_mode {
            style.line_mode = line_mode;
        }
        if let Some(show_legend) = self.show_legend {
            style.show_legend = show_legend;
        }
        config
    }

    /// Validated model plus the adjusted engine config.
    pub fn into_parts(
        self,
        base: ChartEngineConfig,
    ) -> ChartResult<(ChartModel, ChartEngineConfig)> {
        let model = self.to_model();
        model.validate()?;
        let config = self.apply_to_config(base);
        config.validate()?;
        Ok((model, config))
    }
}
