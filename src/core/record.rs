use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::normalize::RawValue;
use crate::error::{ChartError, ChartResult};

/// One dated lab reading as supplied by the record source.
///
/// The chart core never mutates or persists records; they are pulled fresh
/// for every render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub metric_name: String,
    pub date: String,
    #[serde(alias = "value")]
    pub raw_value: RawValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

impl Record {
    #[must_use]
    pub fn new(
        metric_name: impl Into<String>,
        date: impl Into<String>,
        raw_value: impl Into<RawValue>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            date: date.into(),
            raw_value: raw_value.into(),
            display_value: None,
        }
    }

    #[must_use]
    pub fn with_display_value(mut self, display: impl Into<String>) -> Self {
        self.display_value = Some(display.into());
        self
    }

    /// Reads a record from a loosely-shaped JSON object.
    ///
    /// Each concept is looked up through the alias list in `aliases`; the
    /// first key present with a non-null value wins.
    pub fn from_json(value: &Value, aliases: &FieldAliases) -> ChartResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ChartError::InvalidData("record must be a JSON object".to_owned()))?;

        let metric_name = first_text(object, &aliases.metric)
            .ok_or_else(|| missing_field("metric", &aliases.metric))?;
        let date = first_text(object, &aliases.date)
            .ok_or_else(|| missing_field("date", &aliases.date))?;
        let raw_value = first_present(object, &aliases.value)
            .and_then(json_to_raw)
            .ok_or_else(|| missing_field("value", &aliases.value))?;
        let display_value = first_text(object, &aliases.display);

        Ok(Self {
            metric_name,
            date,
            raw_value,
            display_value,
        })
    }

    /// Parsed record date; `None` when the date text is not recognized.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_record_date(&self.date)
    }

    /// Text shown in tooltips: explicit display value, else the raw value as written.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.display_value
            .clone()
            .unwrap_or_else(|| self.raw_value.to_string())
    }
}

/// Ordered candidate key names per record concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAliases {
    pub metric: Vec<String>,
    pub date: Vec<String>,
    pub value: Vec<String>,
    pub display: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            metric: to_owned_list(&["metricName", "type", "typeLabel", "name"]),
            date: to_owned_list(&["date", "日期"]),
            value: to_owned_list(&["value", "数值", "rawValue", "result"]),
            display: to_owned_list(&["displayValue", "display"]),
        }
    }
}

impl FieldAliases {
    /// Prepends a value key so it takes priority over the defaults.
    #[must_use]
    pub fn with_value_key(mut self, key: impl Into<String>) -> Self {
        self.value.insert(0, key.into());
        self
    }

    #[must_use]
    pub fn with_date_key(mut self, key: impl Into<String>) -> Self {
        self.date.insert(0, key.into());
        self
    }
}

fn to_owned_list(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|key| (*key).to_owned()).collect()
}

fn first_present<'a>(object: &'a Map<String, Value>, keys: &[String]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(key))
        .find(|value| !value.is_null())
}

fn first_text(object: &Map<String, Value>, keys: &[String]) -> Option<String> {
    first_present(object, keys).and_then(|value| match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn json_to_raw(value: &Value) -> Option<RawValue> {
    match value {
        Value::Number(number) => number.as_f64().map(RawValue::Number),
        Value::String(text) => Some(RawValue::Text(text.clone())),
        _ => None,
    }
}

fn missing_field(concept: &str, keys: &[String]) -> ChartError {
    ChartError::InvalidData(format!(
        "record has no {concept} field (tried {})",
        keys.join(", ")
    ))
}

/// Parses `YYYY-MM-DD`, `YYYY/MM/DD` and date-time forms.
#[must_use]
pub fn parse_record_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
    const DATE_TIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.fZ",
    ];

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|date_time| date_time.date())
        })
}

/// Groups records by metric name, keeping first-seen metric order.
#[must_use]
pub fn group_by_metric(records: impl IntoIterator<Item = Record>) -> IndexMap<String, Vec<Record>> {
    let mut grouped: IndexMap<String, Vec<Record>> = IndexMap::new();
    for record in records {
        grouped
            .entry(record.metric_name.clone())
            .or_default()
            .push(record);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_matching_alias_wins() {
        let value = json!({
            "type": "ua",
            "日期": "2024-03-01",
            "数值": "452",
            "result": "ignored"
        });
        let record = Record::from_json(&value, &FieldAliases::default()).unwrap();
        assert_eq!(record.metric_name, "ua");
        assert_eq!(record.date, "2024-03-01");
        assert_eq!(record.raw_value, RawValue::Text("452".to_owned()));
    }

    #[test]
    fn null_values_fall_through_to_next_alias() {
        let value = json!({ "metricName": "tg", "date": "2024-01-02", "value": null, "result": 1.9 });
        let record = Record::from_json(&value, &FieldAliases::default()).unwrap();
        assert_eq!(record.raw_value, RawValue::Number(1.9));
    }

    #[test]
    fn missing_value_is_reported() {
        let value = json!({ "metricName": "tg", "date": "2024-01-02" });
        assert!(Record::from_json(&value, &FieldAliases::default()).is_err());
    }

    #[test]
    fn parses_common_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 6);
        assert_eq!(parse_record_date("2024-05-06"), expected);
        assert_eq!(parse_record_date("2024/05/06"), expected);
        assert_eq!(parse_record_date("2024-05-06 08:30"), expected);
        assert_eq!(parse_record_date("yesterday"), None);
    }
}
