// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   checkpoint.rs — model persistence keyed by a model id
//                   derived from (network shape, activations,
//                   batch size, dataset, split parameters),
//                   using Burn's CompactRecorder, plus the
//                   run config JSON needed to rebuild the
//                   model for inspection.
//
//   metrics.rs    — per-epoch metrics logging: writes
//                   epoch-level train/test loss to a CSV file
//                   for later analysis and plotting.
//
//   bookmarks.rs  — named run configurations persisted to a
//                   JSON file, an explicit owning store
//                   instead of hidden module-level state.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Per-epoch metrics CSV logger
pub mod metrics;

/// Named run-configuration bookmarks
pub mod bookmarks;
