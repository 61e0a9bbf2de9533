//! Role × shape → rendering strategy.
//!
//! Dispatch is total: any combination without a dedicated rule resolves to
//! the generic fallback, so one odd section never blanks the dashboard.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::shape::Shape;
use crate::models::SemanticRole;

/// Trend charts with fewer points render a placeholder instead.
pub const MIN_TREND_POINTS: usize = 3;

/// Pie charts are used for at most this many slices.
pub const MAX_PIE_SLICES: usize = 8;

/// How a section is drawn by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    StatCards,
    Pie,
    Bar,
    Line,
    Area,
    RankedBar,
    BulletList,
    Table,
    StructuredText,
    NotEnoughData,
    Empty,
}

impl Strategy {
    /// Whether the UI hands this section to the charting library.
    pub fn is_chart(&self) -> bool {
        matches!(
            self,
            Strategy::Pie | Strategy::Bar | Strategy::Line | Strategy::Area | Strategy::RankedBar
        )
    }
}

/// Strategy plus the keys that drive it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationDecision {
    pub strategy: Strategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series_keys: Vec<String>,
}

impl VisualizationDecision {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            label_key: None,
            value_key: None,
            series_keys: Vec::new(),
        }
    }

    fn keyed(strategy: Strategy, label_key: &str, value_key: &str) -> Self {
        Self {
            strategy,
            label_key: Some(label_key.to_string()),
            value_key: Some(value_key.to_string()),
            series_keys: Vec::new(),
        }
    }

    fn with_series(mut self, series_keys: &[String]) -> Self {
        self.series_keys = series_keys.to_vec();
        self
    }
}

/// Choose how to render `value`, already classified as `shape`, in `role`.
///
/// `value_hint` is the section's preferred value key, if configured.
pub fn dispatch(
    role: SemanticRole,
    shape: &Shape,
    value: &Value,
    value_hint: Option<&str>,
) -> VisualizationDecision {
    let records = value.as_array().map(Vec::as_slice).unwrap_or_default();

    match (role, shape) {
        (SemanticRole::KpiSet, Shape::ScalarMap { .. }) => {
            VisualizationDecision::new(Strategy::StatCards)
        }

        (
            SemanticRole::Totals,
            Shape::CategoricalPairArray {
                label_key,
                value_key,
            },
        ) => {
            let (label, val) = bind_pair(records, label_key, value_key, value_hint);
            let strategy = if is_proportional(records, &val) {
                Strategy::Pie
            } else {
                Strategy::Bar
            };
            VisualizationDecision::keyed(strategy, &label, &val)
        }

        (
            SemanticRole::Totals,
            Shape::LabeledSeries {
                axis_key: Some(axis),
                series_keys,
                ..
            },
        ) if !series_keys.is_empty() => {
            let main = pick_series(series_keys, value_hint);
            VisualizationDecision::keyed(Strategy::Line, axis, main).with_series(series_keys)
        }

        (SemanticRole::Totals, Shape::ScalarMap { .. }) => {
            VisualizationDecision::new(Strategy::Table)
        }

        (
            SemanticRole::Trend,
            Shape::CategoricalPairArray { .. } | Shape::LabeledSeries { .. },
        ) if records.len() < MIN_TREND_POINTS => {
            VisualizationDecision::new(Strategy::NotEnoughData)
        }

        (
            SemanticRole::Trend,
            Shape::CategoricalPairArray {
                label_key,
                value_key,
            },
        ) => {
            let (label, val) = bind_pair(records, label_key, value_key, value_hint);
            VisualizationDecision::keyed(Strategy::Area, &label, &val)
        }

        (
            SemanticRole::Trend,
            Shape::LabeledSeries {
                axis_key: Some(axis),
                series_keys,
                ..
            },
        ) if !series_keys.is_empty() => {
            let main = pick_series(series_keys, value_hint);
            VisualizationDecision::keyed(Strategy::Area, axis, main).with_series(series_keys)
        }

        (
            SemanticRole::Ranking,
            Shape::CategoricalPairArray { .. } | Shape::LabeledSeries { .. },
        ) => match records.first().and_then(Value::as_object).and_then(ranking_keys) {
            Some((label, val)) => VisualizationDecision::keyed(Strategy::RankedBar, &label, &val),
            None => generic(value),
        },

        (SemanticRole::NarrativeList, Shape::PrimitiveList)
            if records.iter().all(Value::is_string) =>
        {
            VisualizationDecision::new(Strategy::BulletList)
        }

        _ => generic(value),
    }
}

/// Fallback for every unmatched role/shape combination.
pub fn generic(value: &Value) -> VisualizationDecision {
    match value {
        Value::Null => VisualizationDecision::new(Strategy::Empty),
        Value::Array(items) if items.is_empty() => VisualizationDecision::new(Strategy::Empty),
        Value::Object(map) if map.is_empty() => VisualizationDecision::new(Strategy::Empty),
        Value::Object(map) => match parallel_columns(map) {
            Some(columns) => VisualizationDecision::new(Strategy::Table).with_series(&columns),
            None => VisualizationDecision::new(Strategy::StructuredText),
        },
        Value::Array(items) => match record_columns(items) {
            Some(columns) => VisualizationDecision::new(Strategy::Table).with_series(&columns),
            None => VisualizationDecision::new(Strategy::StructuredText),
        },
        _ => VisualizationDecision::new(Strategy::StructuredText),
    }
}

/// Label/value keys of a pair array after applying the value hint and the
/// number-first swap.
fn bind_pair(
    records: &[Value],
    first: &str,
    second: &str,
    value_hint: Option<&str>,
) -> (String, String) {
    match value_hint {
        Some(hint) if hint == first => return (second.to_string(), first.to_string()),
        Some(hint) if hint == second => return (first.to_string(), second.to_string()),
        _ => {}
    }

    let swap = records.first().is_some_and(|r| {
        r.get(first).is_some_and(Value::is_number) && !r.get(second).is_some_and(Value::is_number)
    });

    if swap {
        (second.to_string(), first.to_string())
    } else {
        (first.to_string(), second.to_string())
    }
}

/// Main series: the hinted key when present, else the first numeric key.
fn pick_series<'a>(series_keys: &'a [String], value_hint: Option<&str>) -> &'a str {
    value_hint
        .and_then(|hint| series_keys.iter().find(|k| k.as_str() == hint))
        .or_else(|| series_keys.first())
        .map(String::as_str)
        .unwrap_or_default()
}

fn is_proportional(records: &[Value], value_key: &str) -> bool {
    records.len() <= MAX_PIE_SLICES
        && records.iter().all(|r| {
            r.get(value_key)
                .and_then(Value::as_f64)
                .is_some_and(|v| v >= 0.0)
        })
}

/// First string-valued key as label, first number-valued key as value.
fn ranking_keys(first: &Map<String, Value>) -> Option<(String, String)> {
    let label = first.iter().find(|(_, v)| v.is_string()).map(|(k, _)| k)?;
    let value = first.iter().find(|(_, v)| v.is_number()).map(|(k, _)| k)?;
    Some((label.clone(), value.clone()))
}

/// Column names when every first-level value is an array of one shared length.
fn parallel_columns(map: &Map<String, Value>) -> Option<Vec<String>> {
    let mut len = None;
    for value in map.values() {
        let n = value.as_array()?.len();
        match len {
            None => len = Some(n),
            Some(expected) if expected != n => return None,
            Some(_) => {}
        }
    }
    match len {
        Some(n) if n > 0 => Some(map.keys().cloned().collect()),
        _ => None,
    }
}

/// Union of record keys, first-seen order, when every element is an object.
fn record_columns(items: &[Value]) -> Option<Vec<String>> {
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        for key in item.as_object()?.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    (!columns.is_empty()).then_some(columns)
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
