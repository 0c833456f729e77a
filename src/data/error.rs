// ============================================================
// Layer 4 — Data Pipeline Errors
// ============================================================
// The typed failures of the dataset-to-tensor pipeline.
// All of these are fatal from the pipeline's point of view:
// they are never caught internally, only bubbled up through
// anyhow to the CLI, because retrying a malformed dataset
// cannot succeed.
//
//   SchemaError       → records disagree on attributes/types;
//                       aborts dataset construction
//   UnknownLabelError → a label value missing from the label
//                       schema (train/test schema mismatch)
//   MissingFieldError → a feature named by the schema is absent
//                       from a record; indicates schema drift,
//                       unreachable after validation
//
// Reference: Rust Book §9 (Error Handling)

use std::error::Error;
use std::fmt;

/// A dataset whose records do not share one well-typed schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The data array is empty, so no schema can be derived
    EmptyDataset,

    /// A record's attribute-name set differs from record 0's
    AttributeMismatch {
        index: usize,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// The label attribute holds a non-string value
    WrongLabelType {
        attribute: String,
        index: usize,
        found: &'static str,
    },

    /// A feature attribute holds a non-numeric value
    WrongFeatureType {
        attribute: String,
        index: usize,
        found: &'static str,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::EmptyDataset => {
                write!(f, "dataset contains no records")
            }
            SchemaError::AttributeMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "attributes do not fit at record {}: expected [{}], actual [{}]",
                index,
                expected.join(","),
                actual.join(","),
            ),
            SchemaError::WrongLabelType {
                attribute,
                index,
                found,
            } => write!(
                f,
                "label \"{attribute}\" has wrong type \"{found}\" at record {index}",
            ),
            SchemaError::WrongFeatureType {
                attribute,
                index,
                found,
            } => write!(
                f,
                "feature \"{attribute}\" has wrong type \"{found}\" at record {index}",
            ),
        }
    }
}

impl Error for SchemaError {}

/// A record's label value is absent from the derived label schema.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownLabelError {
    pub label: String,
    pub known: Vec<String>,
}

impl fmt::Display for UnknownLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "label \"{}\" is not part of the label schema [{}]",
            self.label,
            self.known.join(","),
        )
    }
}

impl Error for UnknownLabelError {}

/// A feature named by the schema is missing from a record.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingFieldError {
    pub field: String,
}

impl fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record has no attribute \"{}\"", self.field)
    }
}

impl Error for MissingFieldError {}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_mismatch_names_index_and_both_sets() {
        let err = SchemaError::AttributeMismatch {
            index: 3,
            expected: vec!["a".into(), "label".into()],
            actual: vec!["b".into(), "label".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("record 3"));
        assert!(msg.contains("a,label"));
        assert!(msg.contains("b,label"));
    }

    #[test]
    fn test_unknown_label_lists_schema() {
        let err = UnknownLabelError {
            label: "maybe".into(),
            known: vec!["no".into(), "yes".into()],
        };
        assert!(err.to_string().contains("no,yes"));
    }
}
