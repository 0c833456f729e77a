// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (inspecting a dataset, training a model,
// emitting the network graph).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself. Each use
// case returns a report struct; the CLI decides how to show
// it.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Validate a dataset and report schemas and split counts
pub mod inspect_use_case;

// The full training workflow
pub mod train_use_case;

// Rebuild a checkpointed model and emit its node-link graph
pub mod graph_use_case;
