// ============================================================
// Layer 5 — Machine Learning Layer
// ============================================================
// Everything that touches the Burn framework:
//
//   model.rs         — the feed-forward classifier (MLP)
//   tensorize.rs     — lifts data-layer matrices onto a device
//   trainer.rs       — Adam training loop with epoch metrics
//   evaluate.rs      — loss, predictions, confusion matrix
//   graph_builder.rs — weight/bias introspection into the
//                      node-link NetworkGraph view
//
// The CPU ndarray backend is used throughout: the datasets
// are toy-sized and determinism matters more than throughput
// here.
//
// Reference: Burn Book §2 (Backends), §5 (Training)

pub mod model;
pub mod tensorize;
pub mod trainer;
pub mod evaluate;
pub mod graph_builder;

/// Backend for training (gradient tracking enabled)
pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

/// Backend for inference and evaluation
pub type EvalBackend = burn::backend::NdArray;

/// The one device this tool runs on
pub fn default_device() -> burn::backend::ndarray::NdArrayDevice {
    burn::backend::ndarray::NdArrayDevice::default()
}
