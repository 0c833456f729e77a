// ============================================================
// Layer 3 — Dataset Record Domain Types
// ============================================================
// Represents one row of a classification dataset and the
// named collection it belongs to.
//
// A record is a mapping from attribute name to value, where
// exactly one attribute (the label, default name "label") is
// a string and every other attribute is numeric:
//
//   { "petalLength": 1.4, "petalWidth": 0.2, "label": "setosa" }
//
// The BTreeMap keeps attribute names sorted, so iteration
// order is deterministic across loads — the feature schema
// derived from a record never depends on JSON declaration
// order.
//
// Reference: Rust Book §8 (Collections)
//            serde documentation (untagged enums)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute value: either a numeric feature or a
/// string classification label.
///
/// #[serde(untagged)] makes this deserialize directly from
/// plain JSON scalars — `1.4` becomes Number, `"setosa"`
/// becomes Text — with no wrapper object in the file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A numeric feature value
    Number(f64),
    /// A string label value
    Text(String),
}

impl AttributeValue {
    /// The numeric value, if this is a Number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(_) => None,
        }
    }

    /// The string value, if this is a Text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Number(_) => None,
            AttributeValue::Text(s) => Some(s),
        }
    }

    /// Human-readable type name, used in validation errors
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Number(_) => "number",
            AttributeValue::Text(_) => "string",
        }
    }
}

/// One row of a dataset: attribute name → value.
///
/// #[serde(transparent)] means a DataRecord serializes as the
/// bare map, so the on-disk format stays
/// `{"sepalLength": 5.1, ..., "label": "setosa"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRecord {
    values: BTreeMap<String, AttributeValue>,
}

impl DataRecord {
    /// Build a record from (name, value) pairs — mostly used by tests
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, AttributeValue)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Look up one attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// All attribute names, sorted ascending (BTreeMap order)
    pub fn attribute_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Iterate over (name, value) pairs in sorted name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.values.iter()
    }

    /// Number of attributes (features + label)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A named, described collection of records plus provenance.
/// Immutable once loaded — nothing in the pipeline ever
/// mutates a DataSource.
///
/// File format (JSON):
///   {
///     "name": "Iris flower",
///     "description": "...",            (optional)
///     "source": "https://...",          (optional, provenance)
///     "data": [ { ...record... }, ... ]
///   }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    /// Display name of the dataset
    pub name: String,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Where the data originally came from.
    /// `originalSourceUrl` is accepted for older dataset files.
    #[serde(
        default,
        rename = "source",
        alias = "originalSourceUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_url: Option<String>,

    /// The records themselves
    pub data: Vec<DataRecord>,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_value_deserializes_untagged() {
        let n: AttributeValue = serde_json::from_str("1.5").unwrap();
        let s: AttributeValue = serde_json::from_str("\"setosa\"").unwrap();
        assert_eq!(n, AttributeValue::Number(1.5));
        assert_eq!(s, AttributeValue::Text("setosa".to_string()));
    }

    #[test]
    fn test_record_names_are_sorted() {
        let json = r#"{"z": 1.0, "a": 2.0, "label": "x"}"#;
        let record: DataRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.attribute_names(), vec!["a", "label", "z"]);
    }

    #[test]
    fn test_data_source_accepts_legacy_url_field() {
        let json = r#"{
            "name": "iris",
            "originalSourceUrl": "https://example.org/iris",
            "data": [{"a": 1.0, "label": "x"}]
        }"#;
        let source: DataSource = serde_json::from_str(json).unwrap();
        assert_eq!(source.source_url.as_deref(), Some("https://example.org/iris"));
        assert_eq!(source.data.len(), 1);
    }
}
