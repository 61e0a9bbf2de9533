#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use insight_dash::config::DashboardConfig;
use insight_dash::models::AnalysisPayload;
use insight_dash::services::DashboardEngine;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment, since tests run in parallel.
///
/// `Some(v)` sets a variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Engine over the built-in industry profiles.
pub fn builtin_engine() -> Arc<DashboardEngine> {
    Arc::new(DashboardEngine::new(Arc::new(DashboardConfig::builtin())).unwrap())
}

/// A realistic retail analysis as produced by the analytics service.
pub fn retail_payload_json() -> Value {
    json!({
        "summary": {
            "revenue": {
                "type": "numeric",
                "min": 5, "max": 120.5, "mean": 42.123456, "median": 40, "stddev": 12.5, "count": 30
            },
            "region": {
                "type": "categorical",
                "unique_count": 3,
                "top_values": [{"value": "North", "count": 12}, {"value": "South", "count": 10}]
            },
            "returned": {
                "type": "boolean",
                "counts": [{"value": true, "count": 4}, {"value": false, "count": 26}]
            }
        },
        "insights": {
            "kpis": {"total_sales": 1234.5678, "avg_order_value": 41.152, "orders": 30},
            "totals": {
                "sales_by_region": [
                    {"Region": "North", "Sales": 100},
                    {"Region": "South", "Sales": 200}
                ],
                "sales_by_category": {"Electronics": 500, "Grocery": 250.25}
            },
            "trends": [
                {"date": "2024-01-01", "revenue": 10, "orders": 1},
                {"date": "2024-01-02T09:00:00Z", "revenue": 12, "orders": 2},
                {"date": "01/03/2024", "revenue": 9, "orders": 1},
                {"date": 1704326400000i64, "revenue": 15, "orders": 3},
                {"date": "2024-01-05", "revenue": 11, "orders": 2}
            ],
            "highPerformers": [
                {"product": "Widget", "revenue": 500},
                {"product": "Gadget", "revenue": 420.5}
            ],
            "lowPerformers": [
                {"product": "Doohickey", "revenue": 12},
                {"product": "Gizmo", "revenue": 8}
            ],
            "hypothesis": [
                "Weekend promotions lift North region sales",
                "Grocery margin is compressed by returns"
            ]
        }
    })
}

pub fn retail_payload() -> AnalysisPayload {
    serde_json::from_value(retail_payload_json()).unwrap()
}
