//! Structural classification of untyped analysis values.
//!
//! Classification looks only at the structure of a value, never at key
//! names, so the same payload classifies identically for every industry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shape category without metadata, as reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeTag {
    Empty,
    Scalar,
    ScalarMap,
    CategoricalPairArray,
    LabeledSeries,
    PrimitiveList,
    Nested,
}

/// Shape of a value plus the structural metadata needed to bind chart keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `null`, `[]` or `{}`
    Empty,
    /// number, string or boolean
    Scalar,
    /// Object whose values are all primitives; keys in payload order
    ScalarMap { keys: Vec<String> },
    /// Array of two-key objects sharing one key set
    CategoricalPairArray { label_key: String, value_key: String },
    /// Array of objects that is not a uniform pair array
    LabeledSeries {
        keys: Vec<String>,
        /// First non-numeric key of the first element
        axis_key: Option<String>,
        /// Numeric keys of the first element other than the axis key
        series_keys: Vec<String>,
    },
    /// Array of primitives
    PrimitiveList,
    /// Anything else
    Nested,
}

impl Shape {
    pub fn tag(&self) -> ShapeTag {
        match self {
            Shape::Empty => ShapeTag::Empty,
            Shape::Scalar => ShapeTag::Scalar,
            Shape::ScalarMap { .. } => ShapeTag::ScalarMap,
            Shape::CategoricalPairArray { .. } => ShapeTag::CategoricalPairArray,
            Shape::LabeledSeries { .. } => ShapeTag::LabeledSeries,
            Shape::PrimitiveList => ShapeTag::PrimitiveList,
            Shape::Nested => ShapeTag::Nested,
        }
    }

    /// Key that orders records along the x axis, when the shape has one.
    pub fn axis_key(&self) -> Option<&str> {
        match self {
            Shape::CategoricalPairArray { label_key, .. } => Some(label_key),
            Shape::LabeledSeries { axis_key, .. } => axis_key.as_deref(),
            _ => None,
        }
    }
}

/// JSON primitive: null, boolean, number or string.
pub fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Classify a value. Rules are ordered and the first match wins; the last
/// rule accepts everything, so every value has a shape.
pub fn classify(value: &Value) -> Shape {
    match value {
        Value::Null => Shape::Empty,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
        Value::Array(items) if items.is_empty() => Shape::Empty,
        Value::Object(map) if map.is_empty() => Shape::Empty,
        Value::Array(items) => classify_array(items),
        Value::Object(map) if map.values().all(is_primitive) => Shape::ScalarMap {
            keys: map.keys().cloned().collect(),
        },
        Value::Object(_) => Shape::Nested,
    }
}

fn classify_array(items: &[Value]) -> Shape {
    let objects: Option<Vec<&Map<String, Value>>> = items.iter().map(Value::as_object).collect();

    match objects {
        Some(objects) => {
            if let Some((label_key, value_key)) = uniform_pair_keys(&objects) {
                Shape::CategoricalPairArray {
                    label_key,
                    value_key,
                }
            } else {
                labeled_series(objects[0])
            }
        }
        None if items.iter().all(is_primitive) => Shape::PrimitiveList,
        None => Shape::Nested,
    }
}

/// Keys of a uniform two-key object array, in first-seen order.
fn uniform_pair_keys(objects: &[&Map<String, Value>]) -> Option<(String, String)> {
    let first = objects.first()?;
    if first.len() != 2 {
        return None;
    }

    let mut keys = first.keys();
    let label_key = keys.next()?;
    let value_key = keys.next()?;

    let uniform = objects
        .iter()
        .all(|o| o.len() == 2 && o.contains_key(label_key) && o.contains_key(value_key));

    uniform.then(|| (label_key.clone(), value_key.clone()))
}

fn labeled_series(first: &Map<String, Value>) -> Shape {
    let keys: Vec<String> = first.keys().cloned().collect();
    let axis_key = first
        .iter()
        .find(|(_, v)| !v.is_number())
        .map(|(k, _)| k.clone());
    let series_keys = first
        .iter()
        .filter(|(_, v)| v.is_number())
        .map(|(k, _)| k.clone())
        .collect();

    Shape::LabeledSeries {
        keys,
        axis_key,
        series_keys,
    }
}

#[cfg(test)]
#[path = "shape_tests.rs"]
mod tests;
