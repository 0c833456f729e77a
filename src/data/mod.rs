// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from a raw JSON dataset
// all the way to numeric train/test matrices.
//
// The pipeline flows in this order:
//
//   dataset JSON (file or URL)
//       │
//       ▼
//   loader            → parses the DataSource
//       │
//       ▼
//   validator         → asserts one attribute set, typed values
//       │
//       ▼
//   schema            → feature names + label values (sorted)
//       │
//       ▼
//   splitter          → seeded shuffle, train/test partition
//       │
//       ▼
//   dataset           → four row-major f32 matrices
//       │
//       ▼
//   ml layer          → lifts matrices onto the Burn backend
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Typed errors surfaced by validation and encoding
pub mod error;

/// Reads a DataSource from a file path or an HTTP URL
pub mod loader;

/// Checks every record against the first record's schema
pub mod validator;

/// Derives feature/label schemas, extracts vectors, one-hot encodes
pub mod schema;

/// Seeded deterministic shuffle and train/test partition
pub mod splitter;

/// The Dataset aggregate: schemas + split + materialized matrices
pub mod dataset;
