// ============================================================
// Layer 4 — Feature Extraction and Label Encoding
// ============================================================
// Derives the two schemas that give a dataset its numeric
// shape, and applies them to individual records:
//
//   feature schema → sorted list of non-label attribute names.
//                    Position in this list = input column.
//   label schema   → sorted list of distinct label values.
//                    Position in this list = one-hot index.
//
// Both schemas are sorted lexicographically, never in
// declaration order, so column assignment and one-hot index
// assignment are reproducible across loads of the same
// dataset.
//
// Precondition for the derive functions: the records have
// already passed validation (see validator.rs). They read the
// schema off record 0 and trust the rest of the dataset to
// agree with it.
//
// Reference: Rust Book §8 (Collections), §13 (Iterators)

use std::collections::BTreeSet;

use crate::data::error::{MissingFieldError, UnknownLabelError};
use crate::domain::record::DataRecord;

/// All attribute names of record 0 except the label,
/// sorted ascending.
pub fn derive_feature_schema(records: &[DataRecord], label_name: &str) -> Vec<String> {
    records
        .first()
        .map(|record| {
            record
                .attribute_names()
                .into_iter()
                .filter(|name| name != label_name)
                .collect()
        })
        .unwrap_or_default()
}

/// The distinct label values across all records, sorted
/// ascending, duplicates collapsed.
pub fn derive_label_schema(records: &[DataRecord], label_name: &str) -> Vec<String> {
    let values: BTreeSet<String> = records
        .iter()
        .filter_map(|record| record.get(label_name))
        .filter_map(|value| value.as_text())
        .map(str::to_string)
        .collect();
    values.into_iter().collect()
}

/// Look up each feature of `record` in schema order.
///
/// MissingFieldError here means the record was never validated
/// against this schema — a programming defect, not bad data.
pub fn extract_feature_vector(
    record: &DataRecord,
    feature_schema: &[String],
) -> Result<Vec<f32>, MissingFieldError> {
    feature_schema
        .iter()
        .map(|name| {
            record
                .get(name)
                .and_then(|value| value.as_number())
                .map(|n| n as f32)
                .ok_or_else(|| MissingFieldError {
                    field: name.clone(),
                })
        })
        .collect()
}

/// A vector of zeroes with a single 1.0 at `index`.
pub fn one_hot(dimension: usize, index: usize) -> Vec<f32> {
    (0..dimension)
        .map(|i| if i == index { 1.0 } else { 0.0 })
        .collect()
}

/// One-hot encode `record`'s label against the label schema.
///
/// A label value outside the schema is an error — it is never
/// silently mapped to some sentinel index, because that would
/// corrupt the output tensor instead of surfacing the
/// train/test schema mismatch that caused it.
pub fn one_hot_encode(
    record: &DataRecord,
    label_schema: &[String],
    label_name: &str,
) -> Result<Vec<f32>, UnknownLabelError> {
    let label = record
        .get(label_name)
        .and_then(|value| value.as_text())
        .unwrap_or_default();

    let index = label_schema
        .iter()
        .position(|known| known == label)
        .ok_or_else(|| UnknownLabelError {
            label: label.to_string(),
            known: label_schema.to_vec(),
        })?;

    Ok(one_hot(label_schema.len(), index))
}
