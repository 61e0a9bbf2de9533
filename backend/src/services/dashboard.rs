//! The single rendering engine behind every industry dashboard.
//!
//! An industry only contributes configuration (sections, aliases, palette);
//! everything else is decided from the shape of the payload at render time.

use std::borrow::Cow;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::aliases::AliasResolver;
use super::dispatch::{dispatch, VisualizationDecision};
use super::format::title_case;
use super::render::{materialize, SectionData};
use super::shape::{classify, Shape, ShapeTag};
use super::summary::{summarize, SummaryCard};
use super::temporal::{filter_window, DEFAULT_DATE_KEY};
use crate::config::{ConfigResult, DashboardConfig, SectionConfig};
use crate::models::{AnalysisPayload, SemanticRole, WindowSpec};

/// Presentation toggles that do not affect section content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub include_summary: bool,
}

/// One rendered section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    /// Insights key, or `parent.child` for expanded sections
    pub key: String,
    pub title: String,
    pub role: SemanticRole,
    pub shape: ShapeTag,
    pub decision: VisualizationDecision,
    pub data: SectionData,
    /// Records left out of a custom window because their date was unreadable
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dropped_invalid_dates: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// A complete dashboard for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub industry: String,
    pub display_name: String,
    pub palette: Vec<String>,
    pub window: WindowSpec,
    pub sections: Vec<SectionView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<SummaryCard>,
    /// Configured sections absent from the payload
    #[serde(default)]
    pub missing_sections: Vec<String>,
}

/// Renders analysis payloads for any configured industry.
#[derive(Debug, Clone)]
pub struct DashboardEngine {
    config: Arc<DashboardConfig>,
    resolver: AliasResolver,
}

impl DashboardEngine {
    /// Build the engine, validating the configuration's alias tables.
    pub fn new(config: Arc<DashboardConfig>) -> ConfigResult<Self> {
        let resolver = AliasResolver::from_config(&config)?;
        Ok(Self { config, resolver })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn resolver(&self) -> &AliasResolver {
        &self.resolver
    }

    /// Render `payload` with the sections of `industry`.
    ///
    /// Only an unknown industry is an error; missing or malformed sections
    /// are reported in the view.
    pub fn render(
        &self,
        industry: &str,
        payload: &AnalysisPayload,
        window: &WindowSpec,
        options: RenderOptions,
    ) -> ConfigResult<DashboardView> {
        let profile = self.config.profile(industry)?;
        let mut sections = Vec::new();
        let mut missing_sections = Vec::new();

        for section in &profile.sections {
            match payload.insight(&section.key) {
                Some(value) => {
                    render_section(section, value, window, &profile.palette, &mut sections)
                }
                None => missing_sections.push(section.key.clone()),
            }
        }

        if !missing_sections.is_empty() {
            debug!(
                "{}: sections absent from payload: {:?}",
                industry, missing_sections
            );
        }

        let summary = if options.include_summary {
            summarize(&payload.summary, &profile.palette)
        } else {
            Vec::new()
        };

        Ok(DashboardView {
            industry: industry.trim().to_lowercase(),
            display_name: profile.display_name.clone(),
            palette: profile.palette.clone(),
            window: window.clone(),
            sections,
            summary,
            missing_sections,
        })
    }
}

fn render_section(
    section: &SectionConfig,
    value: &Value,
    window: &WindowSpec,
    palette: &[String],
    out: &mut Vec<SectionView>,
) {
    if section.expand {
        if let Some(children) = expandable(value) {
            for (child, child_value) in children {
                let key = format!("{}.{}", section.key, child);
                out.push(section_view(key, title_case(child), section, child_value, window, palette));
            }
            return;
        }
    }

    let title = section
        .title
        .clone()
        .unwrap_or_else(|| title_case(&section.key));
    out.push(section_view(section.key.clone(), title, section, value, window, palette));
}

/// Children of an object that groups several sub-results.
///
/// A scalar map is a single result (one table or card set), not a group.
fn expandable(value: &Value) -> Option<&Map<String, Value>> {
    let map = value.as_object()?;
    match classify(value) {
        Shape::ScalarMap { .. } | Shape::Empty => None,
        _ => Some(map),
    }
}

fn section_view(
    key: String,
    title: String,
    section: &SectionConfig,
    value: &Value,
    window: &WindowSpec,
    palette: &[String],
) -> SectionView {
    let (value, dropped_invalid_dates) = if section.windowed {
        windowed(value, window)
    } else {
        (Cow::Borrowed(value), 0)
    };

    if dropped_invalid_dates > 0 {
        warn!(
            "{}: dropped {} records with unreadable dates",
            key, dropped_invalid_dates
        );
    }

    let shape = classify(&value);
    let decision = dispatch(section.role, &shape, &value, section.value_key.as_deref());
    debug!(
        "{}: role={} shape={:?} strategy={:?}",
        key,
        section.role,
        shape.tag(),
        decision.strategy
    );

    let data = materialize(&decision, &value, palette);
    SectionView {
        key,
        title,
        role: section.role,
        shape: shape.tag(),
        decision,
        data,
        dropped_invalid_dates,
    }
}

fn windowed<'a>(value: &'a Value, window: &WindowSpec) -> (Cow<'a, Value>, usize) {
    let Some(records) = value.as_array() else {
        return (Cow::Borrowed(value), 0);
    };
    if matches!(window, WindowSpec::All) {
        return (Cow::Borrowed(value), 0);
    }

    let shape = classify(value);
    let date_key = date_key(&shape, records.first());
    let result = filter_window(records, window, date_key);
    (Cow::Owned(Value::Array(result.records)), result.dropped_invalid)
}

/// The key holding each record's date: the non-numeric key of a pair
/// array, or the axis of a labeled series.
fn date_key<'a>(shape: &'a Shape, first: Option<&Value>) -> &'a str {
    match shape {
        Shape::CategoricalPairArray {
            label_key,
            value_key,
        } => {
            let label_is_number = first
                .and_then(|r| r.get(label_key))
                .is_some_and(Value::is_number);
            let value_is_number = first
                .and_then(|r| r.get(value_key))
                .is_some_and(Value::is_number);
            if label_is_number && !value_is_number {
                value_key
            } else {
                label_key
            }
        }
        other => other.axis_key().unwrap_or(DEFAULT_DATE_KEY),
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
