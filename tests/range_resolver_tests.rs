use approx::assert_relative_eq;
use proptest::prelude::*;
use trend_chart::core::label_format::format_value;
use trend_chart::core::{LabelPrecision, Series, ValueLabeler, YAxisConfig, resolve_range};

fn single(data: Vec<f64>) -> Vec<Series> {
    vec![Series::new("s", data)]
}

#[test]
fn empty_series_resolve_to_unit_range() {
    let range = resolve_range(&[], &YAxisConfig::default());
    assert_eq!((range.min, range.max), (0.0, 1.0));
    assert_eq!(range.tick_values().len(), 5);
}

#[test]
fn explicit_bounds_override_auto_range() {
    let axis = YAxisConfig {
        min: Some(-5.0),
        max: Some(50.0),
        ..YAxisConfig::default()
    };
    let range = resolve_range(&single(vec![1.0, 2.0]), &axis);
    assert_eq!((range.min, range.max), (-5.0, 50.0));
}

#[test]
fn split_number_controls_auto_ticks() {
    let axis = YAxisConfig {
        split_number: Some(2),
        ..YAxisConfig::default()
    };
    let range = resolve_range(&single(vec![10.0, 20.0]), &axis);
    let ticks = range.tick_values();
    assert_eq!(ticks.len(), 3);
    assert_relative_eq!(ticks[0], 9.0);
    assert_relative_eq!(ticks[1], 15.0);
    assert_relative_eq!(ticks[2], 21.0);
}

#[test]
fn label_precision_follows_range_width() {
    let narrow = resolve_range(&single(vec![0.2, 0.8]), &YAxisConfig::default());
    assert_eq!(ValueLabeler::for_range(&narrow, false).precision(), LabelPrecision::Decimals(2));

    let mid = resolve_range(&single(vec![1.0, 4.0]), &YAxisConfig::default());
    assert_eq!(ValueLabeler::for_range(&mid, false).precision(), LabelPrecision::Decimals(1));

    let wide = resolve_range(&single(vec![100.0, 400.0]), &YAxisConfig::default());
    assert_eq!(ValueLabeler::for_range(&wide, false).precision(), LabelPrecision::Integer);
    assert_eq!(ValueLabeler::for_range(&wide, true).precision(), LabelPrecision::Scientific);
}

#[test]
fn explicit_tick_labels_keep_natural_precision() {
    assert_eq!(format_value(428.0, LabelPrecision::TickNatural), "428");
    assert_eq!(format_value(1.7, LabelPrecision::TickNatural), "1.7");
    assert_eq!(format_value(2.346, LabelPrecision::TickNatural), "2.35");
    assert_eq!(format_value(15.0, LabelPrecision::Scientific), "1.5E+1");
    assert_eq!(format_value(0.0, LabelPrecision::Scientific), "0E0");
    assert_eq!(format_value(2.5, LabelPrecision::Integer), "3");
}

proptest! {
    #[test]
    fn resolved_range_is_never_degenerate(
        values in prop::collection::vec(-1.0e300f64..1.0e300, 0..40),
        split in 0usize..8,
    ) {
        let axis = YAxisConfig {
            split_number: Some(split),
            ..YAxisConfig::default()
        };
        let range = resolve_range(&single(values), &axis);
        prop_assert!(range.max > range.min);
    }

    #[test]
    fn flat_series_still_has_height(value in -1.0e300f64..1.0e300, count in 1usize..20) {
        let range = resolve_range(&single(vec![value; count]), &YAxisConfig::default());
        prop_assert!(range.max > range.min);
    }

    #[test]
    fn single_explicit_tick_still_has_height(tick in -1.0e300f64..1.0e300) {
        let axis = YAxisConfig {
            ticks: Some(vec![tick]),
            ..YAxisConfig::default()
        };
        let range = resolve_range(&single(vec![tick]), &axis);
        prop_assert_eq!(range.min, tick);
        prop_assert!(range.max > range.min);
        prop_assert!(range.max.is_finite());
    }

    #[test]
    fn explicit_ticks_fix_the_domain(
        values in prop::collection::vec(-1.0e4f64..1.0e4, 1..20),
        low in -500.0f64..0.0,
        high in 1.0f64..500.0,
    ) {
        let axis = YAxisConfig {
            ticks: Some(vec![high, (low + high) / 2.0, low]),
            ..YAxisConfig::default()
        };
        let range = resolve_range(&single(values), &axis);
        prop_assert_eq!(range.min, low);
        prop_assert_eq!(range.max, high);
        prop_assert_eq!(range.tick_values().first().copied(), Some(low));
    }
}
