// ============================================================
// Layer 2 — GraphUseCase
// ============================================================
// Rebuilds a checkpointed model and emits its node-link view
// as JSON — the data a frontend would feed an SVG network
// diagram.
//
//   Step 1: Resolve the model id       (Layer 6 - checkpoint)
//   Step 2: Load the saved run config  (Layer 6 - checkpoint)
//   Step 3: Re-frame the dataset to
//           recover the schemas        (Layer 4 - dataset)
//   Step 4: Rebuild + load the model   (Layer 5 + Layer 6)
//   Step 5: Build the network view     (Layer 5 - graph)
//
// The dataset is re-framed with the saved split parameters so
// the feature/label schemas — and therefore the input/output
// node names — are exactly those the model was trained with.

use anyhow::Result;

use crate::data::dataset::Dataset;
use crate::data::loader::source_for;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::graph_builder::ModelGraph;
use crate::ml::model::ClassifierConfig;
use crate::ml::{default_device, EvalBackend};

pub struct GraphConfig {
    pub checkpoint_dir: String,
    /// Defaults to the most recently trained model
    pub model_id: Option<String>,
}

pub struct GraphUseCase {
    config: GraphConfig,
}

impl GraphUseCase {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Returns the network view serialized as pretty JSON.
    pub fn execute(&self) -> Result<String> {
        let checkpoints = CheckpointManager::new(&self.config.checkpoint_dir);

        let id = match &self.config.model_id {
            Some(id) => id.clone(),
            None => checkpoints.latest_id()?,
        };
        let run = checkpoints.load_config(&id)?;
        tracing::info!("Rebuilding model '{}'", id);

        let source = source_for(&run.dataset).load()?;
        let dataset = Dataset::new(source, &run.label_name, run.train_percent, run.shuffle_seed)?;

        let layer_sizes = run.layer_sizes(dataset.input_shape(), dataset.output_shape());
        let device = default_device();
        let model = ClassifierConfig::new(layer_sizes, run.activations.clone())
            .init::<EvalBackend>(&device);
        let model = checkpoints.load_model(model, &id, &device)?;

        let mut graph = ModelGraph::new(
            dataset.feature_schema().to_vec(),
            dataset.label_schema().to_vec(),
        );
        let network = graph.network(&model)?;
        Ok(serde_json::to_string_pretty(network)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::{RunConfig, TrainUseCase};
    use crate::domain::graph::NetworkGraph;
    use crate::ml::model::Activation;
    use std::io::Write;

    #[test]
    fn test_graph_from_trained_checkpoint() {
        // train a tiny model first, then read its graph back
        let mut data_file = tempfile::NamedTempFile::new().unwrap();
        write!(
            data_file,
            r#"{{"name": "mini", "data": [
                {{"a": 1.0, "b": 0.0, "label": "x"}},
                {{"a": 0.0, "b": 1.0, "label": "y"}},
                {{"a": 1.0, "b": 1.0, "label": "x"}},
                {{"a": 0.0, "b": 0.0, "label": "y"}}
            ]}}"#
        )
        .unwrap();
        let ckpt_dir = tempfile::tempdir().unwrap();

        let report = TrainUseCase::new(RunConfig {
            dataset: data_file.path().to_str().unwrap().to_string(),
            label_name: "label".to_string(),
            hidden_layers: vec![3],
            activations: vec![Activation::Tanh, Activation::Softmax],
            batch_size: 4,
            epochs: 2,
            lr: 0.05,
            train_percent: 100.0,
            shuffle_seed: 0,
            checkpoint_dir: ckpt_dir.path().to_str().unwrap().to_string(),
            resume: false,
        })
        .execute()
        .unwrap();

        let json = GraphUseCase::new(GraphConfig {
            checkpoint_dir: ckpt_dir.path().to_str().unwrap().to_string(),
            model_id: Some(report.model_id),
        })
        .execute()
        .unwrap();

        let network: NetworkGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(network.shape(), vec![2, 3, 2]);
        assert_eq!(network.layers[0][0].name.as_deref(), Some("a"));
        assert_eq!(network.layers[2][1].name.as_deref(), Some("y"));
    }
}
