use crate::core::{ChartModel, Color, PixelPoint};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextBaseline,
    TextHAlign, TextMeasurer, TextPrimitive,
};

use super::{ChartLayout, RenderStyle, TooltipStyle};

const DOT_RADIUS: f64 = 4.0;
/// Dot diameter plus the gap before the series name.
const DOT_SLOT: f64 = 16.0;
const NAME_VALUE_GAP: f64 = 12.0;
/// Vertical inset from the plot top.
const TOP_INSET: f64 = 10.0;

/// One `dot + name ... value` line inside the tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub name: String,
    pub value: String,
    pub color: Color,
    pub y: f64,
}

/// Resolved tooltip geometry and content for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipBox {
    pub index: usize,
    /// Slot center the box and guide line are anchored to.
    pub anchor_x: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub header: String,
    pub rows: Vec<TooltipRow>,
    /// The box did not fit right of the anchor and was placed to its left.
    pub flipped: bool,
}

impl TooltipBox {
    /// Lays out the tooltip for `index`.
    ///
    /// Returns `None` when the index has no category or lies outside the
    /// visible window.
    #[must_use]
    pub fn layout(
        index: usize,
        model: &ChartModel,
        layout: &ChartLayout,
        render_style: &RenderStyle,
        style: &TooltipStyle,
        measurer: &dyn TextMeasurer,
        surface_width: f64,
    ) -> Option<Self> {
        let header = model.categories.get(index)?.clone();
        if !layout
            .window()
            .visible_range(layout.mapper.scroll_offset())
            .contains(&index)
        {
            return None;
        }
        let anchor_x = layout.mapper.x_for_index(index);
        let font_size = style.font_size_px;
        let header_height = style.header_height();
        let row_height = style.row_height();

        let mut content_width = measurer.measure_text(&header, font_size, false);
        let mut rows = Vec::with_capacity(model.series.len());
        for (series_index, series) in model.series.iter().enumerate() {
            let value = series.display_at(index).map_or_else(
                || {
                    series
                        .data
                        .get(index)
                        .map(|value| layout.labeler.format(*value))
                        .unwrap_or_default()
                },
                str::to_owned,
            );
            let row_width = DOT_SLOT
                + measurer.measure_text(&series.name, font_size, false)
                + NAME_VALUE_GAP
                + measurer.measure_text(&value, font_size, true);
            content_width = content_width.max(row_width);
            rows.push(TooltipRow {
                name: series.name.clone(),
                value,
                color: series
                    .color
                    .unwrap_or_else(|| render_style.series_color(series_index)),
                y: 0.0,
            });
        }

        let width = (content_width + style.padding * 2.0)
            .max(style.min_width)
            .min(surface_width - style.surface_margin);
        let height = header_height + rows.len() as f64 * row_height + style.padding * 2.0;

        let edge = style.surface_margin / 2.0;
        let mut x = anchor_x + style.anchor_offset;
        let flipped = x + width > surface_width - edge;
        if flipped {
            x = anchor_x - style.anchor_offset - width;
        }
        let plot = layout.plot;
        let mut y = plot.y + TOP_INSET;
        if y + height > plot.bottom() {
            y = plot.bottom() - height - TOP_INSET;
        }

        for (row_index, row) in rows.iter_mut().enumerate() {
            row.y = y
                + style.padding
                + header_height
                + row_index as f64 * row_height
                + row_height / 2.0;
        }

        Some(Self {
            index,
            anchor_x,
            x,
            y,
            width,
            height,
            header,
            rows,
            flipped,
        })
    }

    /// Appends guide line, box and text to the tooltip layer.
    pub fn push_into(&self, frame: &mut RenderFrame, layout: &ChartLayout, style: &TooltipStyle) {
        let plot = layout.plot;
        frame.push(
            CanvasLayerKind::Tooltip,
            LinePrimitive::new(
                self.anchor_x,
                plot.y,
                self.anchor_x,
                plot.bottom(),
                1.0,
                style.guide_color,
            )
            .with_dash(&style.guide_dash),
        );
        frame.push(
            CanvasLayerKind::Tooltip,
            RectPrimitive::new(self.x, self.y, self.width, self.height, style.background)
                .with_border(style.border_width, style.border_color)
                .with_corner_radius(style.corner_radius),
        );
        if !self.header.is_empty() {
            frame.push(
                CanvasLayerKind::Tooltip,
                TextPrimitive::new(
                    self.header.clone(),
                    self.x + style.padding,
                    self.y + style.padding + style.header_height() / 2.0,
                    style.font_size_px,
                    style.font_color,
                    TextHAlign::Left,
                )
                .with_baseline(TextBaseline::Middle),
            );
        }

        for row in &self.rows {
            frame.push(
                CanvasLayerKind::Tooltip,
                CirclePrimitive::new(
                    PixelPoint::new(self.x + style.padding + DOT_RADIUS + 2.0, row.y),
                    DOT_RADIUS,
                    row.color,
                ),
            );
            if !row.name.is_empty() {
                frame.push(
                    CanvasLayerKind::Tooltip,
                    TextPrimitive::new(
                        row.name.clone(),
                        self.x + style.padding + DOT_SLOT,
                        row.y,
                        style.font_size_px,
                        style.font_color,
                        TextHAlign::Left,
                    )
                    .with_baseline(TextBaseline::Middle),
                );
            }
            if !row.value.is_empty() {
                frame.push(
                    CanvasLayerKind::Tooltip,
                    TextPrimitive::new(
                        row.value.clone(),
                        self.x + self.width - style.padding,
                        row.y,
                        style.font_size_px,
                        style.font_color,
                        TextHAlign::Right,
                    )
                    .with_baseline(TextBaseline::Middle)
                    .bold(),
                );
            }
        }
    }
}
