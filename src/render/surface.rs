use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::trace;

use crate::core::types::ViewportConfig;
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, DrawCommand, LinePrimitive, PathPrimitive, PathSegment,
    RectPrimitive, RenderFrame, Renderer, TextBaseline, TextHAlign, TextMeasurer, TextPrimitive,
};

/// Immediate-mode 2D context the chart draws onto (canvas-like).
///
/// Coordinates are physical pixels; [`CanvasRenderer`] applies the device
/// pixel ratio before calling in.
pub trait DrawingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    /// Empty slice resets to solid.
    fn set_line_dash(&mut self, dash: &[f64]);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn stroke(&mut self) -> ChartResult<()>;
    fn fill(&mut self) -> ChartResult<()>;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;

    fn set_font(&mut self, size_px: f64, bold: bool);
    fn set_text_align(&mut self, align: TextHAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    /// Width of `text` at `size_px`, independent of the current font state.
    fn measure_text(&self, text: &str, size_px: f64, bold: bool) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()>;
}

/// A drawing surface plus the physical geometry it was created for.
///
/// Owned by exactly one chart; dropping it releases the backend resources.
#[derive(Debug)]
pub struct ChartSurface<S> {
    surface: S,
    config: ViewportConfig,
}

impl<S: DrawingSurface> ChartSurface<S> {
    #[must_use]
    pub fn new(surface: S, config: ViewportConfig) -> Self {
        Self { surface, config }
    }

    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.config.pixel_ratio
    }

    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        self.config.physical_size()
    }

    pub fn set_config(&mut self, config: ViewportConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.surface
    }
}

/// Replays [`RenderFrame`]s onto a [`DrawingSurface`].
///
/// Every draw pass clears the whole physical surface first; there is no
/// dirty-region tracking.
#[derive(Debug)]
pub struct CanvasRenderer<S> {
    target: ChartSurface<S>,
}

impl<S: DrawingSurface> CanvasRenderer<S> {
    #[must_use]
    pub fn new(target: ChartSurface<S>) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> &ChartSurface<S> {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut ChartSurface<S> {
        &mut self.target
    }

    #[must_use]
    pub fn into_target(self) -> ChartSurface<S> {
        self.target
    }

    fn draw_line(&mut self, line: &LinePrimitive, ratio: f64) -> ChartResult<()> {
        let surface = self.target.surface_mut();
        let dash: Vec<f64> = line.dash.iter().map(|segment| segment * ratio).collect();
        surface.set_line_dash(&dash);
        surface.set_stroke_color(line.color);
        surface.set_line_width(line.stroke_width * ratio);
        surface.begin_path();
        surface.move_to(line.x1 * ratio, line.y1 * ratio);
        surface.line_to(line.x2 * ratio, line.y2 * ratio);
        surface.stroke()?;
        if line.is_dashed() {
            surface.set_line_dash(&[]);
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: RectPrimitive, ratio: f64) -> ChartResult<()> {
        let surface = self.target.surface_mut();
        let (x, y) = (rect.x * ratio, rect.y * ratio);
        let (width, height) = (rect.width * ratio, rect.height * ratio);

        if rect.corner_radius <= 0.0 {
            surface.set_fill_color(rect.fill_color);
            surface.fill_rect(x, y, width, height)?;
            if rect.border_width > 0.0 {
                surface.set_stroke_color(rect.border_color);
                surface.set_line_width(rect.border_width * ratio);
                surface.begin_path();
                surface.move_to(x, y);
                surface.line_to(x + width, y);
                surface.line_to(x + width, y + height);
                surface.line_to(x, y + height);
                surface.close_path();
                surface.stroke()?;
            }
            return Ok(());
        }

        let radius = (rect.corner_radius * ratio).min(width / 2.0).min(height / 2.0);
        append_round_rect(surface, x, y, width, height, radius);
        surface.set_fill_color(rect.fill_color);
        surface.fill()?;
        if rect.border_width > 0.0 {
            surface.set_stroke_color(rect.border_color);
            surface.set_line_width(rect.border_width * ratio);
            surface.stroke()?;
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive, ratio: f64) -> ChartResult<()> {
        let surface = self.target.surface_mut();
        surface.set_font(text.font_size_px * ratio, text.bold);
        surface.set_fill_color(text.color);
        surface.set_text_align(text.h_align);
        surface.set_text_baseline(text.baseline);
        surface.fill_text(&text.text, text.x * ratio, text.y * ratio)
    }

    fn draw_path(&mut self, path: &PathPrimitive, ratio: f64) -> ChartResult<()> {
        let surface = self.target.surface_mut();
        surface.set_line_dash(&[]);
        surface.set_stroke_color(path.color);
        surface.set_line_width(path.stroke_width * ratio);
        surface.begin_path();
        surface.move_to(path.start.x * ratio, path.start.y * ratio);
        for segment in &path.segments {
            match segment {
                PathSegment::LineTo(to) => surface.line_to(to.x * ratio, to.y * ratio),
                PathSegment::QuadTo { control, to } => surface.quadratic_curve_to(
                    control.x * ratio,
                    control.y * ratio,
                    to.x * ratio,
                    to.y * ratio,
                ),
            }
        }
        surface.stroke()
    }

    fn draw_circle(&mut self, circle: CirclePrimitive, ratio: f64) -> ChartResult<()> {
        let surface = self.target.surface_mut();
        surface.set_fill_color(circle.fill_color);
        surface.begin_path();
        surface.arc(
            circle.center.x * ratio,
            circle.center.y * ratio,
            circle.radius * ratio,
            0.0,
            TAU,
        );
        surface.fill()
    }
}

fn append_round_rect<S: DrawingSurface>(
    surface: &mut S,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
) {
    let (right, bottom) = (x + width, y + height);
    surface.begin_path();
    surface.move_to(x + radius, y);
    surface.line_to(right - radius, y);
    surface.arc(right - radius, y + radius, radius, -FRAC_PI_2, 0.0);
    surface.line_to(right, bottom - radius);
    surface.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    surface.line_to(x + radius, bottom);
    surface.arc(x + radius, bottom - radius, radius, FRAC_PI_2, PI);
    surface.line_to(x, y + radius);
    surface.arc(x + radius, y + radius, radius, PI, PI + FRAC_PI_2);
    surface.close_path();
}

impl<S: DrawingSurface> TextMeasurer for CanvasRenderer<S> {
    fn measure_text(&self, text: &str, font_size_px: f64, bold: bool) -> f64 {
        let ratio = self.target.pixel_ratio();
        self.target
            .surface()
            .measure_text(text, font_size_px * ratio, bold)
            / ratio
    }
}

impl<S: DrawingSurface> Renderer for CanvasRenderer<S> {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let ratio = self.target.pixel_ratio();
        let (width, height) = self.target.physical_size();
        self.target
            .surface_mut()
            .clear_rect(0.0, 0.0, f64::from(width), f64::from(height))?;

        for (_, command) in frame.commands() {
            match command {
                DrawCommand::Line(line) => self.draw_line(line, ratio)?,
                DrawCommand::Rect(rect) => self.draw_rect(*rect, ratio)?,
                DrawCommand::Text(text) => self.draw_text(text, ratio)?,
                DrawCommand::Path(path) => self.draw_path(path, ratio)?,
                DrawCommand::Circle(circle) => self.draw_circle(*circle, ratio)?,
            }
        }
        trace!(commands = frame.command_count(), ratio, "replayed frame onto surface");
        Ok(())
    }

    fn set_viewport_config(&mut self, config: ViewportConfig) {
        self.target.set_config(config);
    }
}
