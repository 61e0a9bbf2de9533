//! End-to-end tests of the presentation core through the public API.

mod support;

use std::io::Write;
use std::sync::Arc;

use serde_json::json;

use insight_dash::config::{ConfigError, DashboardConfig, CONFIG_ENV_VAR};
use insight_dash::models::{AnalysisPayload, SemanticRole, WindowSpec};
use insight_dash::services::{
    apply_window, classify, dispatch, DashboardEngine, RenderOptions, Resolution, SectionData,
    ShapeTag, Strategy,
};

use support::{builtin_engine, retail_payload, with_scoped_env};

#[test]
fn kpi_set_renders_one_card_per_entry() {
    let value = json!({"total_sales": 1234.5678});
    let shape = classify(&value);
    assert_eq!(shape.tag(), ShapeTag::ScalarMap);

    let payload: AnalysisPayload =
        serde_json::from_value(json!({"insights": {"kpis": value}})).unwrap();
    let view = builtin_engine()
        .render("retail", &payload, &WindowSpec::All, RenderOptions::default())
        .unwrap();

    let SectionData::StatCards { cards } = &view.sections[0].data else {
        panic!("expected stat cards");
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].label, "Total Sales");
    assert_eq!(cards[0].display, "1234.5678");
}

#[test]
fn totals_pair_array_binds_region_and_sales() {
    let value = json!([{"Region": "North", "Sales": 100}, {"Region": "South", "Sales": 200}]);
    let shape = classify(&value);
    assert_eq!(shape.tag(), ShapeTag::CategoricalPairArray);

    let decision = dispatch(SemanticRole::Totals, &shape, &value, None);
    assert!(matches!(decision.strategy, Strategy::Pie | Strategy::Bar));
    assert_eq!(decision.label_key.as_deref(), Some("Region"));
    assert_eq!(decision.value_key.as_deref(), Some("Sales"));
}

#[test]
fn single_point_trend_is_not_charted() {
    let value = json!([{"date": "2024-01-01", "total": 10}]);
    let decision = dispatch(SemanticRole::Trend, &classify(&value), &value, None);
    assert_eq!(decision.strategy, Strategy::NotEnoughData);
}

#[test]
fn manufacturing_headers_resolve_through_aliases() {
    let engine = builtin_engine();
    let resolver = engine.resolver();
    assert_eq!(
        resolver.resolve("manufacturing", "Unit Cost").unwrap(),
        Resolution::Resolved {
            field: "costCol".to_string()
        }
    );
    assert_eq!(
        resolver.resolve("manufacturing", "banana").unwrap(),
        Resolution::Unresolved
    );
    assert_eq!(
        resolver.resolve("manufacturing", "unit_cost").unwrap(),
        resolver.resolve("manufacturing", "  UNIT   COST ").unwrap()
    );
}

#[test]
fn full_retail_dashboard() {
    let view = builtin_engine()
        .render(
            "retail",
            &retail_payload(),
            &WindowSpec::All,
            RenderOptions {
                include_summary: true,
            },
        )
        .unwrap();

    let keys: Vec<&str> = view.sections.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "kpis",
            "totals.sales_by_region",
            "totals.sales_by_category",
            "trends",
            "highPerformers",
            "lowPerformers",
            "hypothesis",
        ]
    );
    assert_eq!(view.missing_sections, vec!["forecast", "segments", "variance"]);

    let strategies: Vec<Strategy> = view.sections.iter().map(|s| s.decision.strategy).collect();
    assert_eq!(
        strategies,
        vec![
            Strategy::StatCards,
            Strategy::Pie,
            Strategy::Table,
            Strategy::Area,
            Strategy::RankedBar,
            Strategy::RankedBar,
            Strategy::BulletList,
        ]
    );

    let trends = &view.sections[3];
    assert_eq!(trends.decision.value_key.as_deref(), Some("revenue"));

    let summary_types: Vec<Option<&str>> = view
        .summary
        .iter()
        .map(|c| c.field_type.as_deref())
        .collect();
    assert_eq!(
        summary_types,
        vec![Some("numeric"), Some("categorical"), Some("boolean")]
    );
}

#[test]
fn custom_window_from_ui_form_filters_mixed_encodings() {
    let window = WindowSpec::from_parts(Some("custom"), Some("2024-01-02"), Some("01/04/2024")).unwrap();
    let view = builtin_engine()
        .render("retail", &retail_payload(), &window, RenderOptions::default())
        .unwrap();

    let trends = view.sections.iter().find(|s| s.key == "trends").unwrap();
    assert_eq!(trends.decision.strategy, Strategy::Area);
    let SectionData::Series { records } = &trends.data else {
        panic!("expected series");
    };
    let revenue: Vec<i64> = records.iter().map(|r| r["revenue"].as_i64().unwrap()).collect();
    assert_eq!(revenue, vec![12, 9, 15]);
}

#[test]
fn window_is_idempotent_on_payload_series() {
    let payload = retail_payload();
    let series = payload.insight("trends").unwrap().as_array().unwrap().clone();
    for spec in [
        WindowSpec::fixed_days(2),
        WindowSpec::All,
        WindowSpec::from_parts(None, Some("2024-01-03"), None).unwrap(),
    ] {
        let once = apply_window(&series, &spec, "date");
        assert_eq!(apply_window(&once, &spec, "date"), once);
    }
}

#[test]
fn malformed_window_is_rejected() {
    assert!(WindowSpec::from_parts(Some("fortnight"), None, None).is_err());
    assert!(WindowSpec::from_parts(Some("custom"), Some("soon"), None).is_err());
}

const LOGISTICS_TOML: &str = r##"
[industries.logistics]
display_name = "Logistics"
palette = ["#0ea5e9", "#f97316"]

[[industries.logistics.fields]]
name = "shipmentCol"
aliases = ["shipment", "shipment id", "tracking number"]

[[industries.logistics.fields]]
name = "weightCol"
aliases = ["weight", "weight kg"]

[[industries.logistics.sections]]
key = "kpis"
role = "kpi-set"
title = "Delivery KPIs"

[[industries.logistics.sections]]
key = "trends"
role = "trend"
windowed = true
"##;

#[test]
fn config_file_from_env_replaces_builtins() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LOGISTICS_TOML.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config = with_scoped_env(&[(CONFIG_ENV_VAR, Some(&path))], DashboardConfig::load).unwrap();
    let engine = DashboardEngine::new(Arc::new(config)).unwrap();

    assert_eq!(
        engine.resolver().resolve("logistics", "Tracking_Number").unwrap(),
        Resolution::Resolved {
            field: "shipmentCol".to_string()
        }
    );

    let payload: AnalysisPayload =
        serde_json::from_value(json!({"insights": {"kpis": {"on_time_rate": 0.97}}})).unwrap();
    let view = engine
        .render("logistics", &payload, &WindowSpec::All, RenderOptions::default())
        .unwrap();
    assert_eq!(view.sections[0].title, "Delivery KPIs");
    assert_eq!(view.missing_sections, vec!["trends"]);

    let err = engine
        .render("retail", &payload, &WindowSpec::All, RenderOptions::default())
        .unwrap_err();
    assert!(err.is_unknown_industry());
}

#[test]
fn ambiguous_alias_in_config_file_fails_at_load() {
    let toml = r##"
[industries.logistics]
display_name = "Logistics"
palette = ["#0ea5e9"]

[[industries.logistics.fields]]
name = "originCol"
aliases = ["origin", "Depot"]

[[industries.logistics.fields]]
name = "destinationCol"
aliases = ["destination", "depot"]
"##;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(toml.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let err = with_scoped_env(&[(CONFIG_ENV_VAR, Some(&path))], DashboardConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateAlias { .. }));
}

#[test]
fn missing_env_config_file_is_io_error() {
    let err = with_scoped_env(
        &[(CONFIG_ENV_VAR, Some("/nonexistent/dashboard.toml"))],
        DashboardConfig::load,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
