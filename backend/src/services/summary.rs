//! Summary cards for the per-column statistics of an analysis.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dispatch::{generic, Strategy, VisualizationDecision};
use super::format::title_case;
use super::render::{materialize, stat_cards, SectionData};
use crate::models::{BooleanStats, CategoricalStats, FieldDescriptor, NumericStats, ValueCount};

/// One card of the "show summary" panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub field: String,
    pub title: String,
    /// `numeric`, `categorical`, `boolean`, or `None` for unrecognized entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<f64>,
    pub decision: VisualizationDecision,
    pub data: SectionData,
}

/// Cards for every summary entry, in payload order.
pub fn summarize(summary: &Map<String, Value>, palette: &[String]) -> Vec<SummaryCard> {
    summary
        .iter()
        .map(|(field, raw)| match FieldDescriptor::from_value(raw) {
            Some(descriptor) => descriptor_card(field, &descriptor, palette),
            None => {
                let decision = generic(raw);
                let data = materialize(&decision, raw, palette);
                SummaryCard {
                    field: field.clone(),
                    title: title_case(field),
                    field_type: None,
                    unique_count: None,
                    decision,
                    data,
                }
            }
        })
        .collect()
}

fn descriptor_card(field: &str, descriptor: &FieldDescriptor, palette: &[String]) -> SummaryCard {
    let (decision, data, unique_count) = match descriptor {
        FieldDescriptor::Numeric(stats) => {
            let data = SectionData::StatCards {
                cards: stat_cards(&numeric_entries(stats)),
            };
            (VisualizationDecision::new(Strategy::StatCards), data, None)
        }
        FieldDescriptor::Categorical(CategoricalStats {
            unique_count,
            top_values,
        }) => {
            let (decision, data) = counts_chart(top_values, Strategy::Bar, palette);
            (decision, data, *unique_count)
        }
        FieldDescriptor::Boolean(BooleanStats { counts }) => {
            let (decision, data) = counts_chart(counts, Strategy::Pie, palette);
            (decision, data, None)
        }
    };

    SummaryCard {
        field: field.to_string(),
        title: title_case(field),
        field_type: Some(descriptor.type_name().to_string()),
        unique_count,
        decision,
        data,
    }
}

fn numeric_entries(stats: &NumericStats) -> Map<String, Value> {
    [
        ("min", stats.min),
        ("max", stats.max),
        ("mean", stats.mean),
        ("median", stats.median),
        ("stddev", stats.stddev),
        ("count", stats.count),
    ]
    .into_iter()
    .filter_map(|(name, value)| Some((name.to_string(), Value::from(value?))))
    .collect()
}

fn counts_chart(
    counts: &[ValueCount],
    strategy: Strategy,
    palette: &[String],
) -> (VisualizationDecision, SectionData) {
    if counts.is_empty() {
        let decision = VisualizationDecision::new(Strategy::Empty);
        let data = materialize(&decision, &Value::Null, palette);
        return (decision, data);
    }

    let records = Value::Array(
        counts
            .iter()
            .map(|c| serde_json::json!({"value": c.value, "count": c.count}))
            .collect(),
    );
    let decision = VisualizationDecision {
        strategy,
        label_key: Some("value".to_string()),
        value_key: Some("count".to_string()),
        series_keys: Vec::new(),
    };
    let data = materialize(&decision, &records, palette);
    (decision, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn palette() -> Vec<String> {
        vec!["#0f766e".to_string()]
    }

    fn summary(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_numeric_card_lists_present_stats() {
        let cards = summarize(
            &summary(json!({"unit_price": {"type": "numeric", "min": 1, "mean": 4.123456}})),
            &palette(),
        );
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Unit Price");
        assert_eq!(cards[0].field_type.as_deref(), Some("numeric"));
        let SectionData::StatCards { cards: stats } = &cards[0].data else {
            panic!("expected stat cards");
        };
        let labels: Vec<&str> = stats.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Min", "Mean"]);
        assert_eq!(stats[1].display, "4.1235");
    }

    #[test]
    fn test_categorical_card_is_bar_of_top_values() {
        let cards = summarize(
            &summary(json!({"region": {
                "type": "categorical",
                "unique_count": 4,
                "top_values": [{"value": "North", "count": 10}, {"value": "South", "count": 3}]
            }})),
            &palette(),
        );
        assert_eq!(cards[0].decision.strategy, Strategy::Bar);
        assert_eq!(cards[0].unique_count, Some(4.0));
        let SectionData::Categories { items } = &cards[0].data else {
            panic!("expected categories");
        };
        assert_eq!(items[0].label, "North");
        assert_eq!(items[1].value, Some(3.0));
    }

    #[test]
    fn test_boolean_card_is_pie() {
        let cards = summarize(
            &summary(json!({"returned": {
                "type": "boolean",
                "counts": [{"value": true, "count": 7}, {"value": false, "count": 2}]
            }})),
            &palette(),
        );
        assert_eq!(cards[0].decision.strategy, Strategy::Pie);
        let SectionData::Categories { items } = &cards[0].data else {
            panic!("expected categories");
        };
        assert_eq!(items[0].label, "true");
    }

    #[test]
    fn test_empty_counts_is_placeholder() {
        let cards = summarize(
            &summary(json!({"flag": {"type": "boolean", "counts": []}})),
            &palette(),
        );
        assert_eq!(cards[0].decision.strategy, Strategy::Empty);
    }

    #[test]
    fn test_unknown_entries_use_generic_fallback_in_order() {
        let cards = summarize(
            &summary(json!({
                "notes": {"type": "freeform", "text": "n/a"},
                "qty": {"type": "numeric", "max": 3}
            })),
            &palette(),
        );
        assert_eq!(cards[0].field, "notes");
        assert_eq!(cards[0].field_type, None);
        assert_eq!(cards[0].decision.strategy, Strategy::StructuredText);
        assert_eq!(cards[1].field, "qty");
    }
}
