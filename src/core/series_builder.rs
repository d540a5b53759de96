use chrono::NaiveDate;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::color::Color;
use crate::core::model::{ChartModel, GuideLine, Region, Series, YAxisConfig};
use crate::core::normalize::{NormalizedValue, normalize_detailed};
use crate::core::policy::{
    CLAMP_DIVISOR, HAZARD_HEADROOM, MetricPolicyTable, PresentationPolicy,
    UPPER_BOUND_AXIS_MULTIPLE,
};
use crate::core::record::Record;

const GUIDE_COLOR: Color = Color::hex(0xDC2626);
const HALF_GUIDE_COLOR: Color = Color::hex(0xF59E0B);
const HAZARD_FILL: Color = Color::rgba8(239, 68, 68, 0.10);
const GUIDE_DASH: [f64; 2] = [4.0, 4.0];

/// Category label resolution for the x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateGranularity {
    #[default]
    Day,
    Month,
}

impl DateGranularity {
    fn format(self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Month => date.format("%Y-%m").to_string(),
        }
    }
}

/// Turns grouped records into one chart model per plottable metric.
///
/// A metric is dropped entirely when any of its readings fails to normalize;
/// partial series are never produced.
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    policies: MetricPolicyTable,
    granularity: DateGranularity,
    since: Option<NaiveDate>,
}

impl SeriesBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policies(mut self, policies: MetricPolicyTable) -> Self {
        self.policies = policies;
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: DateGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Keeps only records dated on or after `since`.
    #[must_use]
    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    #[must_use]
    pub fn policies(&self) -> &MetricPolicyTable {
        &self.policies
    }

    #[must_use]
    pub fn build(&self, records_by_metric: &IndexMap<String, Vec<Record>>) -> Vec<ChartModel> {
        records_by_metric
            .iter()
            .filter_map(|(metric, records)| self.build_metric(metric, records))
            .collect()
    }

    /// Builds the chart for one metric, or `None` when it is not plottable.
    #[must_use]
    pub fn build_metric(&self, metric: &str, records: &[Record]) -> Option<ChartModel> {
        let mut dated: Vec<(Option<NaiveDate>, &Record)> = records
            .iter()
            .map(|record| (record.parsed_date(), record))
            .filter(|(date, _)| match (self.since, date) {
                (Some(since), Some(date)) => *date >= since,
                (Some(_), None) => false,
                (None, _) => true,
            })
            .collect();
        if dated.is_empty() {
            trace!(metric, "no records in range");
            return None;
        }
        // Undated records sort after dated ones; ties keep source order.
        dated.sort_by_key(|(date, _)| (date.is_none(), *date));

        let mut values = Vec::with_capacity(dated.len());
        for (_, record) in &dated {
            match normalize_detailed(&record.raw_value) {
                Ok(value) => values.push(value),
                Err(failure) => {
                    debug!(
                        metric,
                        date = %record.date,
                        error = %failure,
                        "dropping metric with non-numeric reading"
                    );
                    return None;
                }
            }
        }

        let categories = dated
            .iter()
            .map(|(date, record)| match date {
                Some(date) => self.granularity.format(*date),
                None => record.date.clone(),
            })
            .collect();
        let display = dated.iter().map(|(_, record)| record.display_text()).collect();

        let policy = self.policies.resolve(metric);
        let model = apply_policy(policy, metric, &values, categories, display);
        debug!(metric, points = values.len(), ?policy, "built metric chart");
        Some(model)
    }
}

fn apply_policy(
    policy: PresentationPolicy,
    metric: &str,
    values: &[NormalizedValue],
    categories: Vec<String>,
    display: Vec<String>,
) -> ChartModel {
    let raw: Vec<f64> = values.iter().map(|value| value.value).collect();
    let data_max = raw
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |max| max.0);
    let data_min = raw
        .iter()
        .copied()
        .map(OrderedFloat)
        .min()
        .map_or(0.0, |min| min.0);

    let series_for = |data: Vec<f64>| {
        Series::new(metric, data).with_display_data(display.clone())
    };

    match policy {
        PresentationPolicy::Default => ChartModel::new(categories, vec![series_for(raw)]),
        PresentationPolicy::ScientificClamp { threshold } => {
            let floor = threshold / CLAMP_DIVISOR;
            let data: Vec<f64> = values
                .iter()
                .map(|value| {
                    if is_below_detection(*value, threshold) {
                        floor
                    } else {
                        value.value
                    }
                })
                .collect();
            let plotted_max = data.iter().copied().fold(0.0_f64, f64::max);

            let mut ticks = vec![0.0, threshold / 2.0, threshold];
            if plotted_max > threshold {
                ticks.push((plotted_max / threshold).ceil() * threshold);
            }

            ChartModel::new(categories, vec![series_for(data)])
                .with_scientific(true)
                .with_y_axis(YAxisConfig {
                    ticks: Some(ticks),
                    ..YAxisConfig::default()
                })
                .with_guide_line(GuideLine::dashed(threshold, GUIDE_COLOR, &GUIDE_DASH))
                .with_guide_line(GuideLine::solid(threshold / 2.0, HALF_GUIDE_COLOR))
        }
        PresentationPolicy::HazardBand { low, high } => {
            let min = data_min.min(0.0);
            let max = (high * HAZARD_HEADROOM).max(data_max * 1.1);
            ChartModel::new(categories, vec![series_for(raw)])
                .with_y_axis(YAxisConfig {
                    min: Some(min),
                    max: Some(max),
                    ticks: Some(vec![low, high]),
                    ..YAxisConfig::default()
                })
                .with_background_region(Region::new(min, low, HAZARD_FILL))
                .with_background_region(Region::new(high, max, HAZARD_FILL))
                .with_guide_line(GuideLine::dashed(low, GUIDE_COLOR, &GUIDE_DASH))
                .with_guide_line(GuideLine::dashed(high, GUIDE_COLOR, &GUIDE_DASH))
        }
        PresentationPolicy::UpperBound { bound } => {
            let max = bound * UPPER_BOUND_AXIS_MULTIPLE;
            let min = data_min.min(0.0);
            let data = raw.iter().map(|value| value.min(max)).collect();
            ChartModel::new(categories, vec![series_for(data)])
                .with_y_axis(YAxisConfig {
                    min: Some(min),
                    max: Some(max),
                    ..YAxisConfig::default()
                })
                .with_background_region(Region::new(bound, max, HAZARD_FILL))
                .with_guide_line(GuideLine::dashed(bound, GUIDE_COLOR, &GUIDE_DASH))
        }
    }
}

/// Strictly below threshold, or reported as "<threshold" / "≤threshold".
fn is_below_detection(value: NormalizedValue, threshold: f64) -> bool {
    value.value < threshold
        || (value.value <= threshold
            && value.comparator.is_some_and(|comparator| comparator.is_upper_bound()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::group_by_metric;

    fn records(metric: &str, values: &[(&str, &str)]) -> Vec<Record> {
        values
            .iter()
            .map(|(date, value)| Record::new(metric, *date, *value))
            .collect()
    }

    #[test]
    fn sorts_by_date_and_formats_labels() {
        let input = group_by_metric(records(
            "ALT",
            &[("2024-03-01", "40"), ("2024-01-15", "35"), ("2024-02-10", "38")],
        ));
        let models = SeriesBuilder::new().build(&input);
        assert_eq!(models.len(), 1);
        assert_eq!(
            models[0].categories,
            vec!["2024-01-15", "2024-02-10", "2024-03-01"]
        );
        assert_eq!(models[0].series[0].data, vec![35.0, 38.0, 40.0]);
    }

    #[test]
    fn month_granularity_labels() {
        let input = group_by_metric(records("ALT", &[("2024-03-01", "40")]));
        let models = SeriesBuilder::new()
            .with_granularity(DateGranularity::Month)
            .build(&input);
        assert_eq!(models[0].categories, vec!["2024-03"]);
    }

    #[test]
    fn since_filter_drops_older_records() {
        let input = group_by_metric(records(
            "ALT",
            &[("2023-12-01", "20"), ("2024-02-01", "30")],
        ));
        let since = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let models = SeriesBuilder::new().with_since(since).build(&input);
        assert_eq!(models[0].series[0].data, vec![30.0]);
    }

    #[test]
    fn triglyceride_values_clip_to_axis_top() {
        let input = group_by_metric(records("tg", &[("2024-01-01", "9.5"), ("2024-02-01", "1.2")]));
        let model = &SeriesBuilder::new().build(&input)[0];
        assert_eq!(model.y_axis.max, Some(1.7 * 3.0));
        assert_eq!(model.series[0].data[0], 1.7 * 3.0);
        assert_eq!(model.series[0].display_at(0), Some("9.5"));
        assert_eq!(model.background_regions.len(), 1);
    }
}
