// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - FileSource implements RecordSource
//   - HttpSource also implements RecordSource
//   - The application layer only sees RecordSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use crate::domain::record::DataSource;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce a dataset.
///
/// Implementations:
///   - FileSource → reads a JSON file from disk
///   - HttpSource → GETs a JSON document from a URL
pub trait RecordSource {
    /// Load the full data source, records included.
    fn load(&self) -> Result<DataSource>;
}

// ─── IndexSampler ─────────────────────────────────────────────────────────────
/// A pluggable source of swap indices for the seeded shuffle.
///
/// The splitter's Fisher-Yates loop asks this trait for one
/// index per swap. Production uses a seeded StdRng; tests
/// substitute a fixed sequence so permutations are spelled
/// out by hand.
///
/// Implementations:
///   - SeededSampler → rand::rngs::StdRng seeded from u64
///   - (tests) FixedSampler → replays a scripted sequence
pub trait IndexSampler {
    /// Return an index in `0..max_exclusive`.
    fn next_index(&mut self, max_exclusive: usize) -> usize;
}
