//! Materialization of display data for a dispatched section.
//!
//! The UI receives ready-to-draw data: labels resolved, numbers rounded,
//! colors assigned from the industry palette. Payload values are only read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dispatch::{Strategy, VisualizationDecision};
use super::format::{display_value, round_display, round_value, title_case};

pub const NOT_ENOUGH_DATA_MESSAGE: &str = "Not enough data points to plot a trend";
pub const EMPTY_MESSAGE: &str = "No data available";

static NULL: Value = Value::Null;

/// Display data for one section, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SectionData {
    StatCards { cards: Vec<StatCard> },
    /// Pie slices or bars
    Categories { items: Vec<CategoryPoint> },
    /// Line/area records, numbers rounded
    Series { records: Vec<Value> },
    Ranked { items: Vec<RankedItem> },
    Bullets { items: Vec<String> },
    Table { columns: Vec<String>, rows: Vec<Vec<String>> },
    Text { text: String },
    Placeholder { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub key: String,
    pub label: String,
    pub value: Value,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub label: String,
    pub value: Option<f64>,
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub rank: usize,
    pub label: String,
    pub value: Option<f64>,
    pub display: String,
}

/// Build the display data `decision` calls for.
pub fn materialize(decision: &VisualizationDecision, value: &Value, palette: &[String]) -> SectionData {
    let records = value.as_array().map(Vec::as_slice).unwrap_or_default();
    let label_key = decision.label_key.as_deref().unwrap_or_default();
    let value_key = decision.value_key.as_deref().unwrap_or_default();

    match decision.strategy {
        Strategy::StatCards => SectionData::StatCards {
            cards: value.as_object().map(stat_cards).unwrap_or_default(),
        },
        Strategy::Pie | Strategy::Bar => SectionData::Categories {
            items: records
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    let raw = field(record, value_key);
                    CategoryPoint {
                        label: display_value(field(record, label_key)),
                        value: raw.as_f64().map(round_display),
                        display: display_value(raw),
                        color: palette_color(palette, i),
                    }
                })
                .collect(),
        },
        Strategy::Line | Strategy::Area => SectionData::Series {
            records: records.iter().map(round_value).collect(),
        },
        Strategy::RankedBar => SectionData::Ranked {
            items: records
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    let raw = field(record, value_key);
                    RankedItem {
                        rank: i + 1,
                        label: display_value(field(record, label_key)),
                        value: raw.as_f64().map(round_display),
                        display: display_value(raw),
                    }
                })
                .collect(),
        },
        Strategy::BulletList => SectionData::Bullets {
            items: records.iter().map(display_value).collect(),
        },
        Strategy::Table => table(value, &decision.series_keys),
        Strategy::StructuredText => SectionData::Text {
            text: structured_text(value),
        },
        Strategy::NotEnoughData => SectionData::Placeholder {
            message: NOT_ENOUGH_DATA_MESSAGE.to_string(),
        },
        Strategy::Empty => SectionData::Placeholder {
            message: EMPTY_MESSAGE.to_string(),
        },
    }
}

fn field<'a>(record: &'a Value, key: &str) -> &'a Value {
    record.get(key).unwrap_or(&NULL)
}

fn palette_color(palette: &[String], index: usize) -> Option<String> {
    if palette.is_empty() {
        None
    } else {
        Some(palette[index % palette.len()].clone())
    }
}

pub(crate) fn stat_cards(map: &Map<String, Value>) -> Vec<StatCard> {
    map.iter()
        .map(|(key, raw)| StatCard {
            key: key.clone(),
            label: title_case(key),
            value: round_value(raw),
            display: display_value(raw),
        })
        .collect()
}

/// Rows for the three table layouts: parallel arrays, records, or a
/// metric/value listing of a scalar map.
fn table(value: &Value, columns: &[String]) -> SectionData {
    match value {
        Value::Object(map) if !columns.is_empty() => {
            let len = map
                .values()
                .filter_map(Value::as_array)
                .map(Vec::len)
                .max()
                .unwrap_or(0);
            let rows = (0..len)
                .map(|i| {
                    columns
                        .iter()
                        .map(|c| display_value(map.get(c).and_then(|v| v.get(i)).unwrap_or(&NULL)))
                        .collect()
                })
                .collect();
            SectionData::Table {
                columns: columns.iter().map(|c| title_case(c)).collect(),
                rows,
            }
        }
        Value::Object(map) => SectionData::Table {
            columns: vec!["Metric".to_string(), "Value".to_string()],
            rows: map
                .iter()
                .map(|(k, v)| vec![title_case(k), display_value(v)])
                .collect(),
        },
        Value::Array(records) => SectionData::Table {
            columns: columns.iter().map(|c| title_case(c)).collect(),
            rows: records
                .iter()
                .map(|r| columns.iter().map(|c| display_value(field(r, c))).collect())
                .collect(),
        },
        _ => SectionData::Text {
            text: structured_text(value),
        },
    }
}

fn structured_text(value: &Value) -> String {
    match value {
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(&round_value(value)).unwrap_or_default()
        }
        _ => display_value(value),
    }
}
