use crate::core::{ChartModel, PixelPoint};
use crate::error::ChartResult;
use crate::render::{CanvasLayerKind, CirclePrimitive, PathPrimitive, RenderFrame};

use super::{ChartLayout, LineMode, RenderStyle};

/// Adds one polyline (and optional markers) per series for the visible window.
///
/// Categories outside the window are culled here; the data itself is never
/// filtered.
pub(super) fn push_series(
    frame: &mut RenderFrame,
    model: &ChartModel,
    layout: &ChartLayout,
    style: &RenderStyle,
) -> ChartResult<()> {
    let visible = layout
        .window()
        .visible_range(layout.mapper.scroll_offset());

    for (series_index, series) in model.series.iter().enumerate() {
        let color = series
            .color
            .unwrap_or_else(|| style.series_color(series_index));
        let end = visible.end.min(series.data.len());
        let points = (visible.start..end)
            .map(|index| layout.mapper.to_pixel(index, series.data[index]))
            .collect::<ChartResult<Vec<PixelPoint>>>()?;
        let Some((first, rest)) = points.split_first() else {
            continue;
        };

        if !rest.is_empty() {
            let mut path = PathPrimitive::new(*first, style.series_line_width, color);
            let mut previous = *first;
            for point in rest {
                match style.line_mode {
                    LineMode::Straight => path.line_to(*point),
                    LineMode::Curve => path.quad_to(
                        PixelPoint::new((previous.x + point.x) / 2.0, previous.y),
                        *point,
                    ),
                }
                previous = *point;
            }
            frame.push(CanvasLayerKind::Series, path);
        }

        if style.draws_points() {
            for point in &points {
                frame.push(
                    CanvasLayerKind::Series,
                    CirclePrimitive::new(*point, style.point_radius, color),
                );
            }
        }
    }
    Ok(())
}
