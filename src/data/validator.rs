// ============================================================
// Layer 4 — Dataset Validator
// ============================================================
// Asserts that every record in a dataset is usable before any
// schema is derived from it:
//
//   1. Every record carries exactly the attribute-name set of
//      record 0 (order-independent — the comparison is on the
//      sorted name list)
//   2. The label attribute holds a string in every record
//   3. Every non-label attribute holds a number
//
// This is a pure check with no side effects. It must run
// before schema derivation, because the schema is read off
// record 0 alone and is only representative if all records
// agree with it.
//
// Reference: Rust Book §9 (Error Handling)

use crate::data::error::SchemaError;
use crate::domain::record::DataRecord;

/// Validate `records` against the rules above.
///
/// Errors carry the offending record's position so the user
/// can fix the dataset file directly.
pub fn validate_records(records: &[DataRecord], label_name: &str) -> Result<(), SchemaError> {
    let first = records.first().ok_or(SchemaError::EmptyDataset)?;

    // attribute_names() is already sorted, so set equality is
    // plain Vec equality
    let expected = first.attribute_names();

    for (index, record) in records.iter().enumerate() {
        let actual = record.attribute_names();
        if actual != expected {
            return Err(SchemaError::AttributeMismatch {
                index,
                expected,
                actual,
            });
        }

        for (attribute, value) in record.iter() {
            if attribute == label_name {
                if value.as_text().is_none() {
                    return Err(SchemaError::WrongLabelType {
                        attribute: attribute.clone(),
                        index,
                        found: value.type_name(),
                    });
                }
            } else if value.as_number().is_none() {
                return Err(SchemaError::WrongFeatureType {
                    attribute: attribute.clone(),
                    index,
                    found: value.type_name(),
                });
            }
        }
    }

    Ok(())
}
