use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::{Color, DashPattern, Padding, PlotArea, Viewport, ViewportConfig};
use crate::error::{ChartError, ChartResult};

/// How consecutive points of a series are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    Straight,
    /// Quadratic segments with the control point at the x-midpoint.
    #[default]
    Curve,
}

pub type Palette = SmallVec<[Color; 5]>;

fn default_palette() -> Palette {
    smallvec![
        Color::hex(0x2563EB),
        Color::hex(0x10B981),
        Color::hex(0xF59E0B),
        Color::hex(0xEF4444),
        Color::hex(0x8B5CF6),
    ]
}

/// Visual options for the chart body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderStyle {
    pub line_mode: LineMode,
    pub show_points: bool,
    pub show_legend: bool,
    /// Paints hazard and safe regions.
    pub show_background: bool,
    /// Drops point markers and grid lines.
    pub minimal: bool,
    /// Hides the x-axis baseline.
    pub disable_x_grid: bool,
    pub palette: Palette,
    pub series_line_width: f64,
    pub point_radius: f64,
    pub grid_color: Color,
    pub axis_color: Color,
    pub axis_font_size_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            line_mode: LineMode::Curve,
            show_points: true,
            show_legend: false,
            show_background: true,
            minimal: false,
            disable_x_grid: true,
            palette: default_palette(),
            series_line_width: 2.0,
            point_radius: 3.0,
            grid_color: Color::hex(0xE5E7EB),
            axis_color: Color::hex(0x374151),
            axis_font_size_px: 12.0,
        }
    }
}

impl RenderStyle {
    /// Palette entry for series `index`, cycling.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return default_palette()[index % 5];
        }
        self.palette[index % self.palette.len()]
    }

    #[must_use]
    pub fn draws_points(&self) -> bool {
        self.show_points && !self.minimal
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (label, value) in [
            ("series line width", self.series_line_width),
            ("point radius", self.point_radius),
            ("axis font size", self.axis_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{label} must be finite and > 0"
                )));
            }
        }
        for color in self
            .palette
            .iter()
            .chain([&self.grid_color, &self.axis_color])
        {
            color.validate()?;
        }
        Ok(())
    }
}

/// Tooltip box appearance and placement constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipStyle {
    pub background: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub corner_radius: f64,
    pub font_color: Color,
    pub font_size_px: f64,
    pub padding: f64,
    pub min_width: f64,
    /// Horizontal room kept free between the box and the surface edges.
    pub surface_margin: f64,
    /// Gap between the anchor x and the box.
    pub anchor_offset: f64,
    pub guide_color: Color,
    pub guide_dash: DashPattern,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background: Color::hex(0xFFFFFF),
            border_color: Color::hex(0xE5E7EB),
            border_width: 1.0,
            corner_radius: 8.0,
            font_color: Color::hex(0x222222),
            font_size_px: 14.0,
            padding: 12.0,
            min_width: 120.0,
            surface_margin: 20.0,
            anchor_offset: 12.0,
            guide_color: Color::hex(0xD1D5DB),
            guide_dash: smallvec![4.0, 4.0],
        }
    }
}

impl TooltipStyle {
    /// Height of the category header line.
    #[must_use]
    pub fn header_height(&self) -> f64 {
        (self.font_size_px + 6.0).max(20.0)
    }

    /// Height of each series row.
    #[must_use]
    pub fn row_height(&self) -> f64 {
        (self.font_size_px + 6.0).max(18.0)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "tooltip font size must be finite and > 0".to_owned(),
            ));
        }
        for (label, value) in [
            ("border width", self.border_width),
            ("corner radius", self.corner_radius),
            ("padding", self.padding),
            ("min width", self.min_width),
            ("surface margin", self.surface_margin),
            ("anchor offset", self.anchor_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "tooltip {label} must be finite and >= 0"
                )));
            }
        }
        for color in [
            self.background,
            self.border_color,
            self.font_color,
            self.guide_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEngineConfig {
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub padding: Padding,
    /// Categories visible at once; `None` shows all of them.
    #[serde(default)]
    pub item_count: Option<usize>,
    #[serde(default)]
    pub enable_scroll: bool,
    #[serde(default)]
    pub render_style: RenderStyle,
    #[serde(default)]
    pub tooltip_style: TooltipStyle,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: ViewportConfig::from(viewport),
            padding: Padding::default(),
            item_count: None,
            enable_scroll: false,
            render_style: RenderStyle::default(),
            tooltip_style: TooltipStyle::default(),
        }
    }

    /// Sets the device pixel ratio (clamped to `[1, 3]`).
    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.viewport = ViewportConfig::new(self.viewport.viewport, pixel_ratio);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Limits the visible window; `0` means all categories.
    #[must_use]
    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = (item_count > 0).then_some(item_count);
        self
    }

    #[must_use]
    pub fn with_scroll(mut self, enable_scroll: bool) -> Self {
        self.enable_scroll = enable_scroll;
        self
    }

    #[must_use]
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = style;
        self
    }

    #[must_use]
    pub fn with_tooltip_style(mut self, style: TooltipStyle) -> Self {
        self.tooltip_style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        PlotArea::from_viewport(self.viewport.viewport, self.padding)?;
        self.render_style.validate()?;
        self.tooltip_style.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}
