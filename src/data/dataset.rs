// ============================================================
// Layer 4 — Dataset Aggregate
// ============================================================
// Owns a validated DataSource together with everything
// derived from it:
//
//   - the feature schema (sorted non-label attribute names)
//   - the label schema   (sorted distinct label values)
//   - the current train/test split
//   - four row-major f32 matrices: train/test × input/output
//
// Construction order matters and is fixed:
//   validate → derive schemas from the FULL dataset →
//   split → materialize matrices.
//
// Schemas come from the full dataset, not the train subset,
// so every label that can appear in the test set has a
// one-hot index — an unseen-label error cannot occur inside
// this pipeline.
//
// The only mutation after construction is change_split(),
// which replaces the split and all four matrices atomically
// (it takes &mut self and returns only when everything is
// recomputed, so a caller can never observe a stale input
// matrix paired with a fresh output matrix). Schemas and the
// DataSource are never touched again. Overlapping
// change_split calls are unrepresentable: the &mut receiver
// is the re-entrancy guard.
//
// Matrices are kept framework-free here; Layer 5 lifts them
// onto the Burn backend (see ml/tensorize.rs). Samples stay
// plain Vecs until the ml layer needs device tensors.
//
// Reference: Rust Book §5 (Structs), §10 (Lifetimes of owned data)

use anyhow::{ensure, Context, Result};

use crate::data::schema::{
    derive_feature_schema, derive_label_schema, extract_feature_vector, one_hot_encode,
};
use crate::data::splitter::split_train_test;
use crate::data::validator::validate_records;
use crate::domain::record::{DataRecord, DataSource};

/// A dense row-major f32 matrix. The framework-free tensor
/// carrier between the data layer and the ml layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

impl Matrix {
    /// Stack `rows` (each of length `cols`) into one flat buffer.
    pub fn from_rows(rows: Vec<Vec<f32>>, cols: usize) -> Self {
        let row_count = rows.len();
        let mut data = Vec::with_capacity(row_count * cols);
        for row in rows {
            debug_assert_eq!(row.len(), cols);
            data.extend(row);
        }
        Self {
            rows: row_count,
            cols,
            data,
        }
    }

    /// One row as a slice.
    pub fn row(&self, index: usize) -> &[f32] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Sizes of the two partitions after a (re)split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitCounts {
    pub train: usize,
    pub test: usize,
}

/// The dataset aggregate. See the module header for the
/// construction and mutation rules.
pub struct Dataset {
    source: DataSource,
    label_name: String,
    feature_schema: Vec<String>,
    label_schema: Vec<String>,
    train_records: Vec<DataRecord>,
    test_records: Vec<DataRecord>,
    train_inputs: Matrix,
    train_outputs: Matrix,
    test_inputs: Matrix,
    test_outputs: Matrix,
}

impl Dataset {
    /// Validate, derive schemas, split, materialize.
    ///
    /// `train_percent` is the share of records that go to the
    /// train set (0–100); `shuffle_seed <= 0` keeps the
    /// original record order.
    pub fn new(
        source: DataSource,
        label_name: impl Into<String>,
        train_percent: f64,
        shuffle_seed: i64,
    ) -> Result<Self> {
        let label_name = label_name.into();
        ensure!(
            (0.0..=100.0).contains(&train_percent),
            "train percentage must be within 0-100, got {train_percent}"
        );

        validate_records(&source.data, &label_name)
            .with_context(|| format!("dataset \"{}\" failed validation", source.name))?;

        let feature_schema = derive_feature_schema(&source.data, &label_name);
        let label_schema = derive_label_schema(&source.data, &label_name);
        tracing::info!(
            "Dataset \"{}\": {} records, {} features, {} classes",
            source.name,
            source.data.len(),
            feature_schema.len(),
            label_schema.len(),
        );

        let mut dataset = Self {
            source,
            label_name,
            feature_schema,
            label_schema,
            train_records: Vec::new(),
            test_records: Vec::new(),
            train_inputs: Matrix::from_rows(Vec::new(), 0),
            train_outputs: Matrix::from_rows(Vec::new(), 0),
            test_inputs: Matrix::from_rows(Vec::new(), 0),
            test_outputs: Matrix::from_rows(Vec::new(), 0),
        };
        dataset.change_split(train_percent, shuffle_seed)?;
        Ok(dataset)
    }

    /// Recompute the split and all four matrices with the
    /// EXISTING schemas. The schemas and DataSource are
    /// deliberately left alone: node/one-hot index assignment
    /// must not drift when the user drags the ratio slider.
    pub fn change_split(&mut self, train_percent: f64, shuffle_seed: i64) -> Result<SplitCounts> {
        ensure!(
            (0.0..=100.0).contains(&train_percent),
            "train percentage must be within 0-100, got {train_percent}"
        );

        // computed as one division so 80% gives exactly 0.2;
        // `1.0 - 80.0/100.0` is 0.1999…96 and floors one short
        let test_ratio = (100.0 - train_percent) / 100.0;
        let (train, test) = split_train_test(&self.source.data, test_ratio, shuffle_seed);

        let (train_inputs, train_outputs) = self.materialize(&train)?;
        let (test_inputs, test_outputs) = self.materialize(&test)?;

        self.train_records = train;
        self.test_records = test;
        self.train_inputs = train_inputs;
        self.train_outputs = train_outputs;
        self.test_inputs = test_inputs;
        self.test_outputs = test_outputs;

        let counts = self.counts();
        tracing::debug!(
            "Split changed: {} train / {} test (train {}%, seed {})",
            counts.train,
            counts.test,
            train_percent,
            shuffle_seed,
        );
        Ok(counts)
    }

    /// Turn a record partition into its (input, output) matrices.
    fn materialize(&self, records: &[DataRecord]) -> Result<(Matrix, Matrix)> {
        let mut inputs = Vec::with_capacity(records.len());
        let mut outputs = Vec::with_capacity(records.len());

        for record in records {
            inputs.push(extract_feature_vector(record, &self.feature_schema)?);
            outputs.push(one_hot_encode(record, &self.label_schema, &self.label_name)?);
        }

        Ok((
            Matrix::from_rows(inputs, self.feature_schema.len()),
            Matrix::from_rows(outputs, self.label_schema.len()),
        ))
    }

    // ── Read-only accessors ───────────────────────────────────────────────────

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn label_name(&self) -> &str {
        &self.label_name
    }

    pub fn feature_schema(&self) -> &[String] {
        &self.feature_schema
    }

    pub fn label_schema(&self) -> &[String] {
        &self.label_schema
    }

    /// Width of the input layer
    pub fn input_shape(&self) -> usize {
        self.feature_schema.len()
    }

    /// Width of the output layer
    pub fn output_shape(&self) -> usize {
        self.label_schema.len()
    }

    pub fn train_records(&self) -> &[DataRecord] {
        &self.train_records
    }

    pub fn test_records(&self) -> &[DataRecord] {
        &self.test_records
    }

    pub fn train_inputs(&self) -> &Matrix {
        &self.train_inputs
    }

    pub fn train_outputs(&self) -> &Matrix {
        &self.train_outputs
    }

    pub fn test_inputs(&self) -> &Matrix {
        &self.test_inputs
    }

    pub fn test_outputs(&self) -> &Matrix {
        &self.test_outputs
    }

    pub fn counts(&self) -> SplitCounts {
        SplitCounts {
            train: self.train_records.len(),
            test: self.test_records.len(),
        }
    }
}
