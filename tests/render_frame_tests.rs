use approx::assert_relative_eq;
use trend_chart::api::{ChartEngine, ChartEngineConfig, LineMode, RenderStyle};
use trend_chart::core::{
    ChartModel, Color, GridStyle, GuideLine, Record, Region, SafeRegion, Series, SeriesBuilder,
    Viewport, YAxisConfig, group_by_metric,
};
use trend_chart::render::{
    CanvasLayerKind, DrawCommand, NullRenderer, PathSegment, RenderFrame, TextHAlign,
};

fn config() -> ChartEngineConfig {
    ChartEngineConfig::new(Viewport::new(380, 300))
}

fn engine(model: ChartModel, config: ChartEngineConfig) -> ChartEngine<NullRenderer> {
    ChartEngine::with_model(NullRenderer::default(), config, model).expect("engine init")
}

fn sample_model() -> ChartModel {
    ChartModel::new(
        vec!["01-01".to_owned(), "02-01".to_owned(), "03-01".to_owned()],
        vec![Series::new("ALT", vec![20.0, 35.0, 28.0])],
    )
}

fn layer_texts(frame: &RenderFrame, kind: CanvasLayerKind) -> Vec<String> {
    frame
        .layer(kind)
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text.text.clone()),
            _ => None,
        })
        .collect()
}

fn series_paths(frame: &RenderFrame) -> Vec<&trend_chart::render::PathPrimitive> {
    frame
        .layer(CanvasLayerKind::Series)
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Path(path) => Some(path),
            _ => None,
        })
        .collect()
}

fn circle_count(frame: &RenderFrame, kind: CanvasLayerKind) -> usize {
    frame
        .layer(kind)
        .iter()
        .filter(|command| matches!(command, DrawCommand::Circle(_)))
        .count()
}

#[test]
fn empty_model_skips_render() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), config()).expect("engine init");
    assert!(!engine.render().expect("render"));
    assert_eq!(engine.renderer().frames_rendered, 0);

    let no_series = ChartModel::new(vec!["a".to_owned()], Vec::new());
    engine.set_model(no_series).expect("model");
    assert!(!engine.render().expect("render"));
}

#[test]
fn layers_follow_paint_order() {
    let model = sample_model()
        .with_background_region(Region::new(30.0, 40.0, Color::rgba(1.0, 0.0, 0.0, 0.1)))
        .with_guide_line(GuideLine::solid(25.0, Color::hex(0xDC2626)));
    let style = RenderStyle {
        show_legend: true,
        ..RenderStyle::default()
    };
    let mut engine = engine(model, config().with_render_style(style));
    engine.show_tooltip_at(200.0).expect("tooltip");
    assert!(engine.render().expect("render"));

    let frame = engine.renderer().last_frame.clone().expect("frame");
    let positions: Vec<usize> = frame
        .commands()
        .map(|(kind, _)| {
            CanvasLayerKind::ORDER
                .iter()
                .position(|candidate| *candidate == kind)
                .expect("known layer")
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
    for kind in CanvasLayerKind::ORDER {
        assert!(!frame.layer(kind).is_empty(), "{kind:?} layer is empty");
    }
}

#[test]
fn scientific_clamp_scenario() {
    let records = vec![
        Record::new("HBV-DNA定量", "2024-01-01", "<3.0E+1"),
        Record::new("HBV-DNA定量", "2024-02-01", "45"),
        Record::new("HBV-DNA定量", "2024-03-01", "60"),
    ];
    let model = SeriesBuilder::new()
        .build(&group_by_metric(records))
        .pop()
        .expect("viral load chart");
    assert_eq!(model.series[0].data, vec![5.0, 45.0, 60.0]);

    let mut engine = engine(model, config());
    let frame = engine.build_render_frame().expect("frame");
    let axis_labels = layer_texts(&frame, CanvasLayerKind::Axis);
    for expected in ["0E0", "1.5E+1", "3.0E+1", "6.0E+1"] {
        assert!(axis_labels.iter().any(|label| label == expected), "missing {expected}");
    }

    let first_point = series_paths(&frame)[0].start;
    let expected = engine.map_to_pixel(0, 5.0).expect("pixel");
    assert_relative_eq!(first_point.y, expected.y);

    engine.show_tooltip_at(100.0).expect("tooltip");
    let tooltip = engine.tooltip_box().expect("layout").expect("visible tooltip");
    assert_eq!(tooltip.rows[0].value, "<3.0E+1");
    let frame = engine.build_render_frame().expect("frame");
    assert!(layer_texts(&frame, CanvasLayerKind::Tooltip).contains(&"<3.0E+1".to_owned()));
}

#[test]
fn uric_acid_high_value_sits_in_upper_band() {
    let records = vec![
        Record::new("ua", "2024-01-01", "380"),
        Record::new("ua", "2024-02-01", "500"),
    ];
    let model = SeriesBuilder::new()
        .build(&group_by_metric(records))
        .pop()
        .expect("uric acid chart");
    let engine = engine(model, config());
    let plot = engine.plot_area().expect("plot");

    let y_500 = engine.map_to_pixel(1, 500.0).expect("pixel").y;
    let y_428 = engine.map_to_pixel(1, 428.0).expect("pixel").y;
    assert!(y_500 < y_428);
    assert!(y_500 > plot.y);

    let frame = engine.build_render_frame().expect("frame");
    let covered = frame
        .layer(CanvasLayerKind::Background)
        .iter()
        .any(|command| match command {
            DrawCommand::Rect(rect) => rect.y <= y_500 && y_500 <= rect.y + rect.height,
            _ => false,
        });
    assert!(covered);
}

#[test]
fn only_visible_window_is_drawn() {
    let categories: Vec<String> = (0..10).map(|i| format!("d{i}")).collect();
    let data: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let model = ChartModel::new(categories, vec![Series::new("s", data)]);
    let mut engine = engine(model, config().with_item_count(4).with_scroll(true));

    engine.touch_start(300.0).expect("start");
    engine.touch_move(150.0).expect("move");
    engine.touch_end();
    assert_relative_eq!(engine.scroll_offset(), 150.0);

    let frame = engine.build_render_frame().expect("frame");
    let path = series_paths(&frame)[0];
    assert_eq!(path.segments.len(), 3);
    assert_eq!(circle_count(&frame, CanvasLayerKind::Series), 4);
    let labels = layer_texts(&frame, CanvasLayerKind::Axis);
    assert!(labels.contains(&"d2".to_owned()));
    assert!(labels.contains(&"d5".to_owned()));
    assert!(!labels.contains(&"d1".to_owned()));
    assert!(!labels.contains(&"d6".to_owned()));
}

#[test]
fn curve_mode_uses_midpoint_controls() {
    let engine = engine(sample_model(), config());
    let frame = engine.build_render_frame().expect("frame");
    let path = series_paths(&frame)[0];
    let PathSegment::QuadTo { control, to } = path.segments[0] else {
        panic!("expected quadratic segment");
    };
    assert_relative_eq!(control.x, (path.start.x + to.x) / 2.0);
    assert_relative_eq!(control.y, path.start.y);

    let straight = RenderStyle {
        line_mode: LineMode::Straight,
        ..RenderStyle::default()
    };
    let engine = self::engine(sample_model(), config().with_render_style(straight));
    let frame = engine.build_render_frame().expect("frame");
    assert!(matches!(series_paths(&frame)[0].segments[0], PathSegment::LineTo(_)));
}

#[test]
fn grid_style_controls_dash_and_visibility() {
    let dashed = engine(sample_model(), config()).build_render_frame().expect("frame");
    let grid: Vec<_> = dashed.layer(CanvasLayerKind::Grid).to_vec();
    assert_eq!(grid.len(), 5);
    assert!(grid.iter().all(|command| {
        matches!(command, DrawCommand::Line(line) if line.dash.as_slice() == [5.0, 5.0])
    }));

    let solid_model = sample_model().with_y_axis(YAxisConfig {
        grid_style: GridStyle::Solid,
        ..YAxisConfig::default()
    });
    let solid = engine(solid_model, config()).build_render_frame().expect("frame");
    assert!(solid.lines().all(|line| !line.is_dashed()));

    let minimal = RenderStyle {
        minimal: true,
        ..RenderStyle::default()
    };
    let frame = engine(sample_model(), config().with_render_style(minimal))
        .build_render_frame()
        .expect("frame");
    assert!(frame.layer(CanvasLayerKind::Grid).is_empty());
    assert_eq!(circle_count(&frame, CanvasLayerKind::Series), 0);
}

#[test]
fn safe_region_paints_green_band_and_amber_edges() {
    let model = sample_model().with_safe_region(SafeRegion {
        min: Some(22.0),
        max: 30.0,
        color: None,
    });
    let frame = engine(model.clone(), config()).build_render_frame().expect("frame");
    let fills: Vec<Color> = frame
        .layer(CanvasLayerKind::Background)
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect.fill_color),
            _ => None,
        })
        .collect();
    assert_eq!(fills.len(), 3);
    assert!(fills.contains(&Color::rgba8(16, 185, 129, 0.10)));
    assert_eq!(
        fills
            .iter()
            .filter(|fill| **fill == Color::rgba8(245, 158, 11, 0.10))
            .count(),
        2
    );

    let hidden = RenderStyle {
        show_background: false,
        ..RenderStyle::default()
    };
    let frame = engine(model, config().with_render_style(hidden))
        .build_render_frame()
        .expect("frame");
    assert!(frame.layer(CanvasLayerKind::Background).is_empty());
}

#[test]
fn axis_labels_are_aligned_to_their_axis() {
    let style = RenderStyle {
        disable_x_grid: false,
        ..RenderStyle::default()
    };
    let frame = engine(sample_model(), config().with_render_style(style))
        .build_render_frame()
        .expect("frame");
    let axis = frame.layer(CanvasLayerKind::Axis);
    let lines = axis
        .iter()
        .filter(|command| matches!(command, DrawCommand::Line(_)))
        .count();
    assert_eq!(lines, 2);

    for command in axis {
        if let DrawCommand::Text(text) = command {
            match text.h_align {
                TextHAlign::Center => assert_relative_eq!(text.y, 250.0),
                TextHAlign::Right => assert_relative_eq!(text.x, 40.0),
                TextHAlign::Left => panic!("unexpected left-aligned axis label"),
            }
        }
    }
}

#[test]
fn explicit_series_color_overrides_palette() {
    let custom = Color::hex(0x123456);
    let model = ChartModel::new(
        vec!["a".to_owned(), "b".to_owned()],
        vec![
            Series::new("first", vec![1.0, 2.0]),
            Series::new("second", vec![2.0, 3.0]).with_color(custom),
        ],
    );
    let frame = engine(model, config()).build_render_frame().expect("frame");
    let paths = series_paths(&frame);
    assert_eq!(paths[0].color, RenderStyle::default().series_color(0));
    assert_eq!(paths[1].color, custom);
}

#[test]
fn host_value_formatter_drives_axis_labels() {
    let mut engine = engine(sample_model(), config());
    engine.set_value_formatter(std::sync::Arc::new(|value: f64| format!("{value:.0} U/L")));

    let frame = engine.build_render_frame().expect("frame");
    let labels = layer_texts(&frame, CanvasLayerKind::Axis);
    assert!(labels.iter().any(|label| label.ends_with(" U/L")));
    assert!(labels.iter().any(|label| label == "02-01"));

    engine.clear_value_formatter();
    let frame = engine.build_render_frame().expect("frame");
    assert!(
        layer_texts(&frame, CanvasLayerKind::Axis)
            .iter()
            .all(|label| !label.ends_with(" U/L"))
    );
}
