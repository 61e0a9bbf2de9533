use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Analysis result returned by the analytics service for one uploaded file.
///
/// `insights` is deliberately untyped: sections come and go as the service
/// evolves, and every section is interpreted by shape at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    /// Per-column statistics keyed by column name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: Map<String, Value>,
    /// `kpis`, `totals`, `trends`, `highPerformers`, `lowPerformers`,
    /// `hypothesis` and optional `forecast`, `segments`, `variance`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub insights: Map<String, Value>,
}

impl AnalysisPayload {
    pub fn insight(&self, key: &str) -> Option<&Value> {
        self.insights.get(key)
    }

    /// Typed view of each summary entry, in payload order.
    ///
    /// Entries that do not match any known descriptor are returned as `Err`
    /// with the raw value so callers can still show them.
    pub fn field_descriptors(&self) -> Vec<(&str, Result<FieldDescriptor, &Value>)> {
        self.summary
            .iter()
            .map(|(name, raw)| {
                let descriptor = FieldDescriptor::from_value(raw).ok_or(raw);
                (name.as_str(), descriptor)
            })
            .collect()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Statistics for one source column, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldDescriptor {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
    Boolean(BooleanStats),
}

impl FieldDescriptor {
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldDescriptor::Numeric(_) => "numeric",
            FieldDescriptor::Categorical(_) => "categorical",
            FieldDescriptor::Boolean(_) => "boolean",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub stddev: Option<f64>,
    pub count: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoricalStats {
    pub unique_count: Option<f64>,
    /// Most frequent values, most frequent first
    pub top_values: Vec<ValueCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanStats {
    pub counts: Vec<ValueCount>,
}

/// Occurrence count of one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: Value,
    pub count: f64,
}
