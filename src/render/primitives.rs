use smallvec::SmallVec;

pub use crate::core::color::Color;
use crate::core::model::DashPattern;
use crate::core::types::PixelPoint;
use crate::error::{ChartError, ChartResult};

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

fn ensure_positive(value: f64, what: &str) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite and > 0")))
    }
}

fn validate_dash(dash: &DashPattern) -> ChartResult<()> {
    if dash.iter().all(|segment| segment.is_finite() && *segment >= 0.0) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(
            "dash segments must be finite and >= 0".to_owned(),
        ))
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    /// Empty means solid.
    pub dash: DashPattern,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            dash: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = SmallVec::from_slice(dash);
        self
    }

    #[must_use]
    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        ensure_positive(self.stroke_width, "line stroke width")?;
        validate_dash(&self.dash)?;
        self.color.validate()
    }
}

/// Filled rectangle with optional rounded corners and border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_width: 0.0,
            border_color: fill_color,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub fn with_border(mut self, border_width: f64, border_color: Color) -> Self {
        self.border_width = border_width;
        self.border_color = border_color;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.x, self.y], "rect position")?;
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub baseline: TextBaseline,
    pub bold: bool,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            baseline: TextBaseline::Alphabetic,
            bold: false,
        }
    }

    #[must_use]
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.x, self.y], "text coordinates")?;
        ensure_positive(self.font_size_px, "font size")?;
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    LineTo(PixelPoint),
    QuadTo { control: PixelPoint, to: PixelPoint },
}

/// Stroked open path: one series polyline, straight or smoothed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub start: PixelPoint,
    pub segments: Vec<PathSegment>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(start: PixelPoint, stroke_width: f64, color: Color) -> Self {
        Self {
            start,
            segments: Vec::new(),
            stroke_width,
            color,
        }
    }

    pub fn line_to(&mut self, to: PixelPoint) {
        self.segments.push(PathSegment::LineTo(to));
    }

    pub fn quad_to(&mut self, control: PixelPoint, to: PixelPoint) {
        self.segments.push(PathSegment::QuadTo { control, to });
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite(&[self.start.x, self.start.y], "path start")?;
        for segment in &self.segments {
            match segment {
                PathSegment::LineTo(to) => ensure_finite(&[to.x, to.y], "path point")?,
                PathSegment::QuadTo { control, to } => {
                    ensure_finite(&[control.x, control.y, to.x, to.y], "path curve")?;
                }
            }
        }
        ensure_positive(self.stroke_width, "path stroke width")?;
        self.color.validate()
    }
}

/// Filled circle (point markers, tooltip row dots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center: PixelPoint,
    pub radius: f64,
    pub fill_color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub fn new(center: PixelPoint, radius: f64, fill_color: Color) -> Self {
        Self {
            center,
            radius,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.center.x, self.center.y], "circle center")?;
        ensure_positive(self.radius, "circle radius")?;
        self.fill_color.validate()
    }
}

/// One ordered draw operation inside a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
    Path(PathPrimitive),
    Circle(CirclePrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
            Self::Path(path) => path.validate(),
            Self::Circle(circle) => circle.validate(),
        }
    }
}

impl From<LinePrimitive> for DrawCommand {
    fn from(value: LinePrimitive) -> Self {
        Self::Line(value)
    }
}

impl From<RectPrimitive> for DrawCommand {
    fn from(value: RectPrimitive) -> Self {
        Self::Rect(value)
    }
}

impl From<TextPrimitive> for DrawCommand {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}

impl From<PathPrimitive> for DrawCommand {
    fn from(value: PathPrimitive) -> Self {
        Self::Path(value)
    }
}

impl From<CirclePrimitive> for DrawCommand {
    fn from(value: CirclePrimitive) -> Self {
        Self::Circle(value)
    }
}
