use approx::assert_relative_eq;
use proptest::prelude::*;
use trend_chart::core::{
    CategoryWindow, CoordinateMapper, LinearScale, Padding, PlotArea, Series, Viewport,
    YAxisConfig, resolve_range,
};

fn plot() -> PlotArea {
    PlotArea::from_viewport(Viewport::new(380, 300), Padding::default()).expect("plot area")
}

fn mapper(total: usize, item_count: Option<usize>, min: f64, max: f64, offset: f64) -> CoordinateMapper {
    let axis = YAxisConfig {
        min: Some(min),
        max: Some(max),
        ..YAxisConfig::default()
    };
    let range = resolve_range(&[], &axis);
    let plot = plot();
    CoordinateMapper::new(plot, CategoryWindow::new(total, item_count, plot.width), &range, offset)
        .expect("mapper")
}

#[test]
fn plot_area_is_viewport_minus_padding() {
    let plot = plot();
    assert_eq!((plot.x, plot.y, plot.width, plot.height), (50.0, 40.0, 300.0, 200.0));
    assert!(PlotArea::from_viewport(Viewport::new(60, 60), Padding::default()).is_err());
}

#[test]
fn slot_centers_and_value_heights() {
    let mapper = mapper(3, None, 0.0, 100.0, 0.0);
    let point = mapper.to_pixel(0, 0.0).expect("pixel");
    assert_relative_eq!(point.x, 100.0);
    assert_relative_eq!(point.y, 240.0);
    let top = mapper.to_pixel(2, 100.0).expect("pixel");
    assert_relative_eq!(top.x, 300.0);
    assert_relative_eq!(top.y, 40.0);
}

#[test]
fn scrolled_window_starts_at_whole_slots() {
    let mapper = mapper(6, Some(3), 0.0, 1.0, 150.0);
    assert_eq!(mapper.scroll_start_index(), 1);
    assert_relative_eq!(mapper.x_for_index(1), 100.0);
    assert_eq!(mapper.window().visible_range(150.0), 1..4);
}

#[test]
fn scroll_offset_is_clamped_to_window() {
    let mapper = mapper(6, Some(3), 0.0, 1.0, 10_000.0);
    assert_relative_eq!(mapper.scroll_offset(), 300.0);
    assert_eq!(mapper.scroll_start_index(), 3);
}

#[test]
fn hit_test_clamps_to_visible_slots() {
    let mapper = mapper(6, Some(3), 0.0, 1.0, 0.0);
    assert_eq!(mapper.hit_test(50.0), Some(0));
    assert_eq!(mapper.hit_test(149.0), Some(0));
    assert_eq!(mapper.hit_test(151.0), Some(1));
    assert_eq!(mapper.hit_test(10_000.0), Some(2));
    assert_eq!(mapper.hit_test(-10_000.0), Some(0));

    let scrolled = mapper_scrolled();
    assert_eq!(scrolled.hit_test(50.0), Some(3));
    assert_eq!(scrolled.hit_test(10_000.0), Some(5));
}

fn mapper_scrolled() -> CoordinateMapper {
    mapper(6, Some(3), 0.0, 1.0, 300.0)
}

#[test]
fn empty_window_has_no_hit() {
    let plot = plot();
    let window = CategoryWindow::new(0, Some(3), plot.width);
    assert_eq!(window.hit_test(100.0, 0.0, plot), None);
    assert_eq!(window.max_scroll(), 0.0);
}

#[test]
fn zero_item_count_shows_everything() {
    let window = CategoryWindow::new(12, Some(0), 300.0);
    assert_eq!(window.visible_item_count(), 12);
    assert_relative_eq!(window.item_width(), 25.0);
    assert_eq!(window.max_scroll(), 0.0);
}

#[test]
fn linear_scale_inverts_pixel_y() {
    let scale = LinearScale::new(0.0, 50.0).expect("scale");
    let plot = plot();
    let y = scale.value_to_pixel_y(12.5, plot).expect("to pixel");
    assert_relative_eq!(y, 190.0);
    assert_relative_eq!(scale.pixel_y_to_value(y, plot).expect("to value"), 12.5);
    assert!(LinearScale::new(3.0, 3.0).is_err());
}

proptest! {
    #[test]
    fn larger_values_never_plot_lower(
        data in prop::collection::vec(-1.0e5f64..1.0e5, 1..30),
        a in -1.0e5f64..1.0e5,
        b in -1.0e5f64..1.0e5,
    ) {
        let series = vec![Series::new("s", data.clone())];
        let range = resolve_range(&series, &YAxisConfig::default());
        let plot = plot();
        let window = CategoryWindow::new(data.len(), None, plot.width);
        let mapper = CoordinateMapper::new(plot, window, &range, 0.0).expect("mapper");

        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let y_low = mapper.y_for_value(low).expect("y");
        let y_high = mapper.y_for_value(high).expect("y");
        prop_assert!(y_high <= y_low);
    }

    #[test]
    fn hit_index_stays_in_category_bounds(
        total in 1usize..60,
        item_count in 0usize..12,
        offset in 0.0f64..5_000.0,
        x in -1_000.0f64..1_000.0,
    ) {
        let plot = plot();
        let window = CategoryWindow::new(total, Some(item_count), plot.width);
        let offset = window.clamp_scroll(offset);
        let index = window.hit_test(x, offset, plot).expect("non-empty window hits");
        prop_assert!(index < total);
        prop_assert!(window.visible_range(offset).contains(&index));
    }
}
