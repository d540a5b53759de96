use chrono::NaiveDate;
use serde_json::json;
use trend_chart::core::policy::VIRAL_LOAD_THRESHOLD;
use trend_chart::core::{
    FieldAliases, MetricPolicyTable, PresentationPolicy, Record, SeriesBuilder, group_by_metric,
};

fn record(metric: &str, date: &str, value: &str) -> Record {
    Record::new(metric, date, value)
}

#[test]
fn metric_with_unparseable_reading_is_excluded() {
    let records = vec![
        record("ALT", "2024-01-01", "35"),
        record("ALT", "2024-02-01", "pending"),
        record("AST", "2024-01-01", "22"),
    ];
    let models = SeriesBuilder::new().build(&group_by_metric(records));

    assert_eq!(models.len(), 1);
    assert_eq!(models[0].series[0].name, "AST");
    assert!(
        models
            .iter()
            .flat_map(|model| &model.series)
            .all(|series| series.name != "ALT")
    );
}

#[test]
fn viral_load_clamps_below_detection_readings() {
    let records = vec![
        record("HBV-DNA定量", "2024-01-01", "<3.0E+1"),
        record("HBV-DNA定量", "2024-02-01", "45"),
        record("HBV-DNA定量", "2024-03-01", "60"),
    ];
    let models = SeriesBuilder::new().build(&group_by_metric(records));
    let model = &models[0];

    assert_eq!(model.series[0].data, vec![5.0, 45.0, 60.0]);
    assert_eq!(model.series[0].display_at(0), Some("<3.0E+1"));
    assert!(model.scientific);
    assert_eq!(model.y_axis.ticks, Some(vec![0.0, 15.0, 30.0, 60.0]));
    assert_eq!(model.guide_lines.len(), 2);
    assert_eq!(model.guide_lines[0].value, VIRAL_LOAD_THRESHOLD);
    assert!(model.guide_lines[0].dash.is_some());
    assert!(model.guide_lines[1].dash.is_none());
}

#[test]
fn viral_load_at_threshold_without_comparator_is_kept() {
    let records = vec![record("dna", "2024-01-01", "30"), record("dna", "2024-01-02", "≤30")];
    let models = SeriesBuilder::new().build(&group_by_metric(records));
    assert_eq!(models[0].series[0].data, vec![30.0, 5.0]);
    assert_eq!(models[0].y_axis.ticks, Some(vec![0.0, 15.0, 30.0]));
}

#[test]
fn uric_acid_gets_hazard_bands_and_fixed_ticks() {
    let records = vec![
        record("尿酸", "2024-01-01", "380"),
        record("尿酸", "2024-02-01", "500"),
    ];
    let models = SeriesBuilder::new().build(&group_by_metric(records));
    let model = &models[0];

    assert_eq!(model.y_axis.ticks, Some(vec![208.0, 428.0]));
    assert_eq!(model.y_axis.min, Some(0.0));
    assert_eq!(model.y_axis.max, Some(642.0));
    assert_eq!(model.background_regions.len(), 2);
    assert_eq!(model.background_regions[1].min, 428.0);
    assert_eq!(model.background_regions[1].max, 642.0);
}

#[test]
fn policy_lookup_is_case_insensitive_and_overridable() {
    let table = MetricPolicyTable::default();
    assert_eq!(
        table.resolve("HBV_DNA"),
        PresentationPolicy::ScientificClamp { threshold: 30.0 }
    );
    assert_eq!(table.resolve("glucose"), PresentationPolicy::Default);

    let custom = MetricPolicyTable::empty()
        .with_policy("glucose", PresentationPolicy::UpperBound { bound: 6.1 });
    let records = vec![record("Glucose", "2024-01-01", "7.0")];
    let models = SeriesBuilder::new()
        .with_policies(custom)
        .build(&group_by_metric(records));
    assert_eq!(models[0].y_axis.max, Some(6.1 * 3.0));
}

#[test]
fn undated_records_sort_last_and_keep_their_label() {
    let records = vec![
        record("ALT", "unknown", "50"),
        record("ALT", "2024-05-01", "40"),
    ];
    let models = SeriesBuilder::new().build(&group_by_metric(records.clone()));
    assert_eq!(models[0].categories, vec!["2024-05-01", "unknown"]);

    let since = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    let filtered = SeriesBuilder::new()
        .with_since(since)
        .build(&group_by_metric(records));
    assert_eq!(filtered[0].categories, vec!["2024-05-01"]);
}

#[test]
fn records_load_from_json_aliases() {
    let aliases = FieldAliases::default();
    let entries = [
        json!({"metricName": "ALT", "日期": "2024/01/02", "数值": "41"}),
        json!({"type": "ALT", "date": "2024-01-01", "value": 38, "displayValue": "38 U/L"}),
    ];
    let records: Vec<Record> = entries
        .iter()
        .map(|entry| Record::from_json(entry, &aliases).expect("record"))
        .collect();

    let models = SeriesBuilder::new().build(&group_by_metric(records));
    let model = &models[0];
    assert_eq!(model.categories, vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(model.series[0].data, vec![38.0, 41.0]);
    assert_eq!(model.series[0].display_at(0), Some("38 U/L"));
}

#[test]
fn json_record_without_value_is_rejected() {
    let error = Record::from_json(&json!({"metricName": "ALT", "date": "2024-01-01"}), &FieldAliases::default())
        .expect_err("missing value");
    assert!(error.to_string().contains("value"));
}
