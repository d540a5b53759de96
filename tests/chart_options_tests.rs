use trend_chart::ChartError;
use trend_chart::api::{ChartEngineConfig, ChartOptions, LineMode};
use trend_chart::core::{Color, GridStyle, Viewport};

fn base() -> ChartEngineConfig {
    ChartEngineConfig::new(Viewport::new(375, 260))
}

#[test]
fn page_options_split_into_model_and_config() {
    let options = ChartOptions::from_json_str(
        r##"{
            "categories": ["01-01", "02-01"],
            "series": [{"name": "ALT", "data": [35, 41], "color": "#2563eb"}],
            "itemCount": 7,
            "enableScroll": true,
            "yAxisMin": 0,
            "yAxisMax": 120,
            "guideLines": [{"y": 40, "color": "#ef4444", "dash": [4, 4]}],
            "safeRegion": {"max": 40},
            "lineMode": "straight",
            "showLegend": true
        }"##,
    )
    .expect("options");
    let (model, config) = options.into_parts(base()).expect("parts");

    assert_eq!(model.categories, vec!["01-01", "02-01"]);
    assert_eq!(model.series[0].color, Some(Color::hex(0x2563EB)));
    assert_eq!(model.y_axis.min, Some(0.0));
    assert_eq!(model.y_axis.max, Some(120.0));
    assert_eq!(model.y_axis.grid_style, GridStyle::Dashed);
    assert_eq!(model.guide_lines[0].value, 40.0);
    assert!(model.guide_lines[0].dash.is_some());
    assert_eq!(model.safe_region.map(|region| region.max), Some(40.0));

    assert_eq!(config.item_count, Some(7));
    assert!(config.enable_scroll);
    assert_eq!(config.render_style.line_mode, LineMode::Straight);
    assert!(config.render_style.show_legend);
    assert!(config.render_style.show_background);
}

#[test]
fn minimal_mode_drops_grid_and_markers() {
    let options = ChartOptions::from_json_str(
        r#"{"categories": ["a"], "series": [{"name": "s", "data": [1]}], "minimal": true, "gridStyle": "solid"}"#,
    )
    .expect("options");
    let (model, config) = options.into_parts(base()).expect("parts");
    assert_eq!(model.y_axis.grid_style, GridStyle::None);
    assert!(config.render_style.minimal);
    assert!(!config.render_style.draws_points());
}

#[test]
fn zero_or_missing_item_count_shows_everything() {
    let zero = ChartOptions::from_json_str(r#"{"itemCount": 0}"#).expect("options");
    assert_eq!(zero.apply_to_config(base()).item_count, None);

    let missing = ChartOptions::from_json_str("{}").expect("options");
    assert_eq!(missing.apply_to_config(base()).item_count, None);
    assert!(missing.show_background);
}

#[test]
fn negative_item_count_is_rejected() {
    let result = ChartOptions::from_json_str(r#"{"itemCount": -3}"#);
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
}

#[test]
fn mismatched_series_length_fails_validation() {
    let options = ChartOptions::from_json_str(
        r#"{"categories": ["a", "b"], "series": [{"name": "s", "data": [1]}]}"#,
    )
    .expect("options");
    let result = options.into_parts(base());
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn engine_config_round_trips_through_json() {
    let config = base().with_pixel_ratio(2.0).with_item_count(5).with_scroll(true);
    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn pixel_ratio_is_clamped() {
    assert_eq!(base().with_pixel_ratio(5.0).viewport.pixel_ratio, 3.0);
    assert_eq!(base().with_pixel_ratio(0.5).viewport.pixel_ratio, 1.0);
}

#[test]
fn json_pixel_ratio_is_clamped_and_camel_cased() {
    let zero = ChartEngineConfig::from_json_str(
        r#"{"viewport": {"viewport": {"width": 375, "height": 260}, "pixelRatio": 0.0}}"#,
    )
    .expect("config");
    assert_eq!(zero.viewport.pixel_ratio, 1.0);
    assert_eq!(zero.viewport.physical_size(), (375, 260));

    let retina = ChartEngineConfig::from_json_str(
        r#"{"viewport": {"viewport": {"width": 375, "height": 260}, "pixelRatio": 2}}"#,
    )
    .expect("config");
    assert_eq!(retina.viewport.pixel_ratio, 2.0);

    let snake = ChartEngineConfig::from_json_str(
        r#"{"viewport": {"viewport": {"width": 375, "height": 260}, "pixel_ratio": 9.0}}"#,
    )
    .expect("config");
    assert_eq!(snake.viewport.pixel_ratio, 3.0);

    let json = retina.to_json_pretty().expect("serialize");
    assert!(json.contains("\"pixelRatio\""));
}

#[test]
fn out_of_range_pixel_ratio_fails_validation() {
    let mut config = base();
    config.viewport.pixel_ratio = 0.0;
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));
}
