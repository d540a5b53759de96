use crate::error::ChartResult;
use crate::render::{
    Color, DrawingSurface, EstimatedTextMetrics, TextBaseline, TextHAlign, TextMeasurer,
};

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    StrokeColor(Color),
    FillColor(Color),
    LineWidth(f64),
    LineDash(Vec<f64>),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cx: f64, cy: f64, x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64 },
    ClosePath,
    Stroke,
    Fill,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    Font { size_px: f64, bold: bool },
    TextAlign(TextHAlign),
    TextBaseline(TextBaseline),
    FillText { text: String, x: f64, y: f64 },
}

/// Headless surface that records every call, for replay assertions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Text drawn, in call order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count(&self, matcher: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|call| matcher(call)).count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.calls.push(SurfaceCall::ClearRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.calls.push(SurfaceCall::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(SurfaceCall::FillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.calls.push(SurfaceCall::LineWidth(width));
    }

    fn set_line_dash(&mut self, dash: &[f64]) {
        self.calls.push(SurfaceCall::LineDash(dash.to_vec()));
    }

    fn begin_path(&mut self) {
        self.calls.push(SurfaceCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(SurfaceCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(SurfaceCall::LineTo { x, y });
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.calls
            .push(SurfaceCall::QuadraticCurveTo { cx, cy, x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.calls.push(SurfaceCall::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.calls.push(SurfaceCall::ClosePath);
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.calls.push(SurfaceCall::Stroke);
        Ok(())
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.calls.push(SurfaceCall::Fill);
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.calls.push(SurfaceCall::FillRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn set_font(&mut self, size_px: f64, bold: bool) {
        self.calls.push(SurfaceCall::Font { size_px, bold });
    }

    fn set_text_align(&mut self, align: TextHAlign) {
        self.calls.push(SurfaceCall::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.calls.push(SurfaceCall::TextBaseline(baseline));
    }

    fn measure_text(&self, text: &str, size_px: f64, bold: bool) -> f64 {
        EstimatedTextMetrics.measure_text(text, size_px, bold)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        self.calls.push(SurfaceCall::FillText {
            text: text.to_owned(),
            x,
            y,
        });
        Ok(())
    }
}
