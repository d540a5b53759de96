use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const MIN_PIXEL_RATIO: f64 = 1.0;
pub const MAX_PIXEL_RATIO: f64 = 3.0;

/// Logical chart size in CSS-like pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn ensure_valid(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Surface geometry sourced once by the host and injected into the chart.
///
/// Rendering happens in logical pixels; backends multiply by `pixel_ratio`
/// when writing to the physical surface.
/// Deserialized input passes through [`ViewportConfig::new`] so the ratio
/// clamp also applies to JSON configs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ViewportConfigInput")]
pub struct ViewportConfig {
    pub viewport: Viewport,
    pub pixel_ratio: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewportConfigInput {
    viewport: Viewport,
    #[serde(default = "default_pixel_ratio", alias = "pixel_ratio")]
    pixel_ratio: f64,
}

fn default_pixel_ratio() -> f64 {
    MIN_PIXEL_RATIO
}

impl From<ViewportConfigInput> for ViewportConfig {
    fn from(input: ViewportConfigInput) -> Self {
        Self::new(input.viewport, input.pixel_ratio)
    }
}

impl ViewportConfig {
    /// Creates a config, clamping the device pixel ratio into `[1, 3]`.
    #[must_use]
    pub fn new(viewport: Viewport, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() {
            pixel_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
        } else {
            MIN_PIXEL_RATIO
        };
        Self {
            viewport,
            pixel_ratio,
        }
    }

    /// Rejects ratios outside `[1, 3]`, e.g. from a struct literal.
    pub fn validate(self) -> ChartResult<Self> {
        if !self.pixel_ratio.is_finite()
            || !(MIN_PIXEL_RATIO..=MAX_PIXEL_RATIO).contains(&self.pixel_ratio)
        {
            return Err(ChartError::InvalidConfig(format!(
                "pixel ratio must be within [{MIN_PIXEL_RATIO}, {MAX_PIXEL_RATIO}], got {}",
                self.pixel_ratio
            )));
        }
        self.viewport.ensure_valid()?;
        Ok(self)
    }

    /// Physical surface dimensions after device-pixel-ratio scaling.
    #[must_use]
    pub fn physical_size(self) -> (u32, u32) {
        (
            (f64::from(self.viewport.width) * self.pixel_ratio).round() as u32,
            (f64::from(self.viewport.height) * self.pixel_ratio).round() as u32,
        )
    }
}

impl From<Viewport> for ViewportConfig {
    fn from(viewport: Viewport) -> Self {
        Self::new(viewport, MIN_PIXEL_RATIO)
    }
}

/// Space reserved around the plot for axis labels and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 30.0,
            bottom: 60.0,
            left: 50.0,
        }
    }
}

impl Padding {
    pub fn validate(self) -> ChartResult<Self> {
        for value in [self.top, self.right, self.bottom, self.left] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "padding values must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(self)
    }
}

/// Plot rectangle in logical pixels (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_viewport(viewport: Viewport, padding: Padding) -> ChartResult<Self> {
        viewport.ensure_valid()?;
        let padding = padding.validate()?;
        let width = f64::from(viewport.width) - padding.left - padding.right;
        let height = f64::from(viewport.height) - padding.top - padding.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "padding leaves no plot area in {}x{} viewport",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            x: padding.left,
            y: padding.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }
}

/// Point in logical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
