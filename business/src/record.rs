//! Schema-less entity rows.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Insertion-ordered JSON object, the shape every entity arrives in.
pub type JsonFields = serde_json::Map<String, Value>;

/// A field-name to value mapping whose key order is meaningful.
pub trait FieldMap {
    type Value;

    fn field_names(&self) -> impl Iterator<Item = &str>;

    fn field(&self, name: &str) -> Option<&Self::Value>;

    fn field_count(&self) -> usize;
}

impl FieldMap for JsonFields {
    type Value = Value;

    fn field_names(&self) -> impl Iterator<Item = &str> {
        self.keys().map(String::as_str)
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn field_count(&self) -> usize {
        self.len()
    }
}

impl<V> FieldMap for BTreeMap<String, V> {
    type Value = V;

    fn field_names(&self) -> impl Iterator<Item = &str> {
        self.keys().map(String::as_str)
    }

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }

    fn field_count(&self) -> usize {
        self.len()
    }
}

/// One entity (employee, department, project, ...). Its shape is whatever
/// the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord<M = JsonFields> {
    fields: M,
}

impl<M: FieldMap> EntityRecord<M> {
    pub fn new(fields: M) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &M {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&M::Value> {
        self.fields.field(name)
    }
}

impl EntityRecord<JsonFields> {
    /// Text shown in a table cell. Missing fields and nulls render empty.
    pub fn cell_text(&self, name: &str) -> String {
        match self.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Total order over the values of `name`, used for column sorting.
    pub fn compare_field(&self, other: &Self, name: &str) -> Ordering {
        compare_values(self.get(name), other.get(name))
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_) | Value::Object(_)) => 4,
    }
}

/// Exact for integers of either sign, f64 only when a float is involved.
fn compare_numbers(x: &serde_json::Number, y: &serde_json::Number) -> Ordering {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x.cmp(&y);
    }
    if !x.is_f64() && !y.is_f64() {
        // Only a negative i64 against a u64 above i64::MAX is left.
        return if x.as_i64().is_some() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }
    let x = x.as_f64().unwrap_or(f64::NAN);
    let y = y.as_f64().unwrap_or(f64::NAN);
    x.total_cmp(&y)
}

/// Nulls first, then booleans, numbers (numerically), strings
/// (lexicographically) and finally nested values by their JSON text.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => compare_numbers(x, y),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ (Value::Array(_) | Value::Object(_))), Some(y @ (Value::Array(_) | Value::Object(_)))) => {
            x.to_string().cmp(&y.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}
