use cairo::{Context, Format, ImageSurface, Operator};
use pango::{FontDescription, Weight};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, TextBaseline, TextHAlign};

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Works either offscreen on an owned `ImageSurface` or in place on an
/// external Cairo context (for example a GTK `DrawingArea` callback).
/// Quadratic curves are raised to cubic Béziers since Cairo has no
/// quadratic primitive.
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    image: Option<ImageSurface>,
    stroke_color: Color,
    fill_color: Color,
    font_size_px: f64,
    bold: bool,
    align: TextHAlign,
    baseline: TextBaseline,
    cursor: (f64, f64),
}

impl CairoSurface {
    /// Offscreen ARGB32 surface of `width` x `height` physical pixels.
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let image = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&image)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self::with_context(context, Some(image)))
    }

    /// Draws onto a context owned by the host.
    #[must_use]
    pub fn from_context(context: Context) -> Self {
        Self::with_context(context, None)
    }

    fn with_context(context: Context, image: Option<ImageSurface>) -> Self {
        let black = Color::rgb(0.0, 0.0, 0.0);
        Self {
            context,
            image,
            stroke_color: black,
            fill_color: black,
            font_size_px: 12.0,
            bold: false,
            align: TextHAlign::Left,
            baseline: TextBaseline::Alphabetic,
            cursor: (0.0, 0.0),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    /// Offscreen image, when created with [`CairoSurface::new`].
    #[must_use]
    pub fn image(&self) -> Option<&ImageSurface> {
        self.image.as_ref()
    }

    fn apply_color(&self, color: Color) {
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }

    fn layout(&self, text: &str, size_px: f64, bold: bool) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let mut font = FontDescription::from_string("Sans");
        font.set_absolute_size(size_px * f64::from(pango::SCALE));
        if bold {
            font.set_weight(Weight::Bold);
        }
        layout.set_font_description(Some(&font));
        layout.set_text(text);
        layout
    }
}

impl DrawingSurface for CairoSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.context.set_operator(Operator::Clear);
        self.context.rectangle(x, y, width, height);
        let filled = self
            .context
            .fill()
            .map_err(|err| map_backend_error("failed to clear surface", err));
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        filled
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_dash(&mut self, dash: &[f64]) {
        self.context.set_dash(dash, 0.0);
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
        self.cursor = (x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
        self.cursor = (x, y);
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let (x0, y0) = self.cursor;
        let c1 = (x0 + 2.0 / 3.0 * (cx - x0), y0 + 2.0 / 3.0 * (cy - y0));
        let c2 = (x + 2.0 / 3.0 * (cx - x), y + 2.0 / 3.0 * (cy - y));
        self.context.curve_to(c1.0, c1.1, c2.0, c2.1, x, y);
        self.cursor = (x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.context.arc(x, y, radius, start_angle, end_angle);
        self.cursor = (
            x + radius * end_angle.cos(),
            y + radius * end_angle.sin(),
        );
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.apply_color(self.stroke_color);
        self.context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.apply_color(self.fill_color);
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.context.new_path();
        self.context.rectangle(x, y, width, height);
        self.apply_color(self.fill_color);
        let filled = self
            .context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err));
        self.context.new_path();
        filled
    }

    fn set_font(&mut self, size_px: f64, bold: bool) {
        self.font_size_px = size_px;
        self.bold = bold;
    }

    fn set_text_align(&mut self, align: TextHAlign) {
        self.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn measure_text(&self, text: &str, size_px: f64, bold: bool) -> f64 {
        let (width, _) = self.layout(text, size_px, bold).pixel_size();
        f64::from(width)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        let layout = self.layout(text, self.font_size_px, self.bold);
        let (width, height) = layout.pixel_size();
        let (width, height) = (f64::from(width), f64::from(height));

        let left = match self.align {
            TextHAlign::Left => x,
            TextHAlign::Center => x - width / 2.0,
            TextHAlign::Right => x - width,
        };
        let top = match self.baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - height / 2.0,
            TextBaseline::Alphabetic => y - f64::from(layout.baseline()) / f64::from(pango::SCALE),
        };

        self.context.new_path();
        self.apply_color(self.fill_color);
        self.context.move_to(left, top);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        Ok(())
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
