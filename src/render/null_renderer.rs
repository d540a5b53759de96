use crate::error::ChartResult;
use crate::render::{
    DrawCommand, EstimatedTextMetrics, RenderFrame, Renderer, TextMeasurer,
};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_command_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl TextMeasurer for NullRenderer {
    fn measure_text(&self, text: &str, font_size_px: f64, bold: bool) -> f64 {
        EstimatedTextMetrics.measure_text(text, font_size_px, bold)
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_command_count = frame.command_count();
        self.last_line_count = frame
            .commands()
            .filter(|(_, command)| matches!(command, DrawCommand::Line(_)))
            .count();
        self.last_text_count = frame.texts().count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
