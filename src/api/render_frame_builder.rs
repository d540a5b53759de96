use smallvec::SmallVec;

use crate::core::{ChartModel, Color, GridStyle, PlotArea};
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextBaseline,
    TextHAlign, TextMeasurer, TextPrimitive,
};

use super::series_frame_builder::push_series;
use super::{ChartEngine, ChartLayout, RenderStyle, TooltipBox};

const GRID_DASH: [f64; 2] = [5.0, 5.0];
const AXIS_LABEL_GAP: f64 = 10.0;
const SAFE_FILL: Color = Color::rgba8(16, 185, 129, 0.10);
const CAUTION_FILL: Color = Color::rgba8(245, 158, 11, 0.10);

const LEGEND_TOP: f64 = 20.0;
const LEGEND_SWATCH_WIDTH: f64 = 12.0;
const LEGEND_SWATCH_HEIGHT: f64 = 8.0;
const LEGEND_TEXT_OFFSET: f64 = 16.0;
const LEGEND_ENTRY_GAP: f64 = 40.0;

impl<R: Renderer> ChartEngine<R> {
    /// Materializes backend-agnostic primitives for the current state.
    ///
    /// Layers are filled in draw order; an empty model yields an empty frame.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let config = &self.core.config;
        let mut frame = RenderFrame::new(config.viewport.viewport);
        let model = &self.core.model;
        if !model.is_renderable() {
            return Ok(frame);
        }

        let layout = self.layout()?;
        let style = &config.render_style;

        if style.show_background {
            push_background(&mut frame, model, &layout)?;
        }
        if !style.minimal && model.y_axis.grid_style != GridStyle::None {
            push_grid(&mut frame, model.y_axis.grid_style, &layout, style)?;
        }
        push_axes(&mut frame, model, &layout, style)?;
        push_guide_lines(&mut frame, model, &layout)?;
        push_series(&mut frame, model, &layout, style)?;
        if style.show_legend {
            push_legend(&mut frame, model, layout.plot, style, &self.renderer);
        }

        if let Some(index) = self.core.interaction.active_tooltip_index() {
            let tooltip = TooltipBox::layout(
                index,
                model,
                &layout,
                style,
                &config.tooltip_style,
                &self.renderer,
                f64::from(config.viewport.viewport.width),
            );
            if let Some(tooltip) = tooltip {
                tooltip.push_into(&mut frame, &layout, &config.tooltip_style);
            }
        }
        Ok(frame)
    }
}

/// Band between two data values, clipped to the plot box.
fn push_band(
    frame: &mut RenderFrame,
    layout: &ChartLayout,
    top_px: f64,
    bottom_px: f64,
    color: Color,
) {
    let plot = layout.plot;
    let top = top_px.max(plot.y);
    let bottom = bottom_px.min(plot.bottom());
    if bottom <= top {
        return;
    }
    frame.push(
        CanvasLayerKind::Background,
        RectPrimitive::new(plot.x, top, plot.width, bottom - top, color),
    );
}

fn push_background(
    frame: &mut RenderFrame,
    model: &ChartModel,
    layout: &ChartLayout,
) -> ChartResult<()> {
    let mapper = &layout.mapper;
    for region in &model.background_regions {
        let (low, high) = if region.min <= region.max {
            (region.min, region.max)
        } else {
            (region.max, region.min)
        };
        push_band(
            frame,
            layout,
            mapper.y_for_value(high)?,
            mapper.y_for_value(low)?,
            region.color,
        );
    }

    let Some(safe) = model.safe_region else {
        return Ok(());
    };
    let plot = layout.plot;
    let safe_fill = safe.color.unwrap_or(SAFE_FILL);
    let max_y = mapper.y_for_value(safe.max)?;
    push_band(frame, layout, plot.y, max_y, CAUTION_FILL);
    match safe.min {
        Some(min) => {
            let min_y = mapper.y_for_value(min)?;
            push_band(frame, layout, max_y, min_y, safe_fill);
            push_band(frame, layout, min_y, plot.bottom(), CAUTION_FILL);
        }
        None => push_band(frame, layout, max_y, plot.bottom(), safe_fill),
    }
    Ok(())
}

fn push_grid(
    frame: &mut RenderFrame,
    grid_style: GridStyle,
    layout: &ChartLayout,
    style: &RenderStyle,
) -> ChartResult<()> {
    let plot = layout.plot;
    let dash: SmallVec<[f64; 2]> = match grid_style {
        GridStyle::Dashed => SmallVec::from_slice(&GRID_DASH),
        GridStyle::Solid | GridStyle::None => SmallVec::new(),
    };
    for tick in layout.range.tick_values() {
        let y = layout.mapper.y_for_value(tick)?;
        frame.push(
            CanvasLayerKind::Grid,
            LinePrimitive::new(plot.x, y, plot.right(), y, 1.0, style.grid_color).with_dash(&dash),
        );
    }
    Ok(())
}

fn push_axes(
    frame: &mut RenderFrame,
    model: &ChartModel,
    layout: &ChartLayout,
    style: &RenderStyle,
) -> ChartResult<()> {
    let plot = layout.plot;
    let color = style.axis_color;
    let font_size = style.axis_font_size_px;

    if !style.disable_x_grid {
        frame.push(
            CanvasLayerKind::Axis,
            LinePrimitive::new(plot.x, plot.bottom(), plot.right(), plot.bottom(), 1.0, color),
        );
    }
    frame.push(
        CanvasLayerKind::Axis,
        LinePrimitive::new(plot.x, plot.y, plot.x, plot.bottom(), 1.0, color),
    );

    let visible = layout
        .window()
        .visible_range(layout.mapper.scroll_offset());
    for index in visible {
        let Some(category) = model.categories.get(index) else {
            continue;
        };
        if category.is_empty() {
            continue;
        }
        frame.push(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                category.clone(),
                layout.mapper.x_for_index(index),
                plot.bottom() + AXIS_LABEL_GAP,
                font_size,
                color,
                TextHAlign::Center,
            )
            .with_baseline(TextBaseline::Top),
        );
    }

    for tick in layout.range.tick_values() {
        let text = layout.labeler.format(tick);
        if text.is_empty() {
            continue;
        }
        frame.push(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                text,
                plot.x - AXIS_LABEL_GAP,
                layout.mapper.y_for_value(tick)?,
                font_size,
                color,
                TextHAlign::Right,
            )
            .with_baseline(TextBaseline::Middle),
        );
    }
    Ok(())
}

fn push_guide_lines(
    frame: &mut RenderFrame,
    model: &ChartModel,
    layout: &ChartLayout,
) -> ChartResult<()> {
    let plot = layout.plot;
    for guide in &model.guide_lines {
        let y = layout.mapper.y_for_value(guide.value)?;
        let mut line = LinePrimitive::new(plot.x, y, plot.right(), y, guide.width, guide.color);
        if let Some(dash) = &guide.dash {
            line = line.with_dash(dash);
        }
        frame.push(CanvasLayerKind::GuideLine, line);
    }
    Ok(())
}

fn push_legend(
    frame: &mut RenderFrame,
    model: &ChartModel,
    plot: PlotArea,
    style: &RenderStyle,
    measurer: &dyn TextMeasurer,
) {
    let font_size = style.axis_font_size_px;
    let mut x = plot.x;
    for (series_index, series) in model.series.iter().enumerate() {
        let color = series
            .color
            .unwrap_or_else(|| style.series_color(series_index));
        frame.push(
            CanvasLayerKind::Legend,
            RectPrimitive::new(
                x,
                LEGEND_TOP - LEGEND_SWATCH_HEIGHT / 2.0,
                LEGEND_SWATCH_WIDTH,
                LEGEND_SWATCH_HEIGHT,
                color,
            ),
        );
        if !series.name.is_empty() {
            frame.push(
                CanvasLayerKind::Legend,
                TextPrimitive::new(
                    series.name.clone(),
                    x + LEGEND_TEXT_OFFSET,
                    LEGEND_TOP,
                    font_size,
                    style.axis_color,
                    TextHAlign::Left,
                )
                .with_baseline(TextBaseline::Middle),
            );
        }
        x += measurer.measure_text(&series.name, font_size, false) + LEGEND_ENTRY_GAP;
    }
}
