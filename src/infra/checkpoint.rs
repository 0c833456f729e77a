// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's
// CompactRecorder, keyed by a model identity string.
//
// The model id encodes everything that makes two trained
// models interchangeable: network shape, activations, batch
// size, dataset, train percentage and shuffle seed. Change
// any of these and you get a different id — and therefore a
// different checkpoint — so resuming can never load weights
// into a mismatched architecture or a differently framed
// dataset.
//
// File layout under the checkpoint directory:
//   {model_id}.mpk      ← model weights (CompactRecorder)
//   {model_id}.json     ← the RunConfig that produced them
//   latest.json         ← id of the most recently saved model
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::RunConfig;
use crate::ml::model::{Activation, Classifier};

/// Identity string for a trained model.
///
/// Everything non-alphanumeric in the dataset locator is
/// flattened to '_' so the id stays filesystem-safe.
pub fn model_id(
    layer_sizes: &[usize],
    activations: &[Activation],
    batch_size: usize,
    dataset: &str,
    train_percent: f64,
    shuffle_seed: i64,
) -> String {
    let shape = layer_sizes
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("-");
    let acts = activations
        .iter()
        .map(Activation::to_string)
        .collect::<Vec<_>>()
        .join("-");
    let sanitized: String = dataset
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{shape}__{acts}__{batch_size}__{train_percent}__{shuffle_seed}__{sanitized}")
}

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save model weights under the given id and point
    /// latest.json at it.
    pub fn save_model<B: Backend>(&self, model: &Classifier<B>, id: &str) -> Result<()> {
        let path = self.dir.join(id);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("failed to save checkpoint to '{}'", path.display()))?;

        let latest_path = self.dir.join("latest.json");
        fs::write(&latest_path, serde_json::to_string(&id)?)
            .with_context(|| "failed to write latest.json")?;

        tracing::debug!("Saved checkpoint '{}'", id);
        Ok(())
    }

    /// Load weights for `id` into `model`.
    /// The model must already have the architecture the
    /// checkpoint was saved with, or loading fails.
    pub fn load_model<B: Backend>(
        &self,
        model: Classifier<B>,
        id: &str,
        device: &B::Device,
    ) -> Result<Classifier<B>> {
        let path = self.dir.join(id);
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "cannot load checkpoint '{}'. Have you trained this configuration first?",
                    path.display()
                )
            })?;
        Ok(model.load_record(record))
    }

    /// True if a checkpoint exists for `id`.
    pub fn has_model(&self, id: &str) -> bool {
        self.dir.join(format!("{id}.mpk")).exists()
    }

    /// Save the run configuration that produced `id`, so the
    /// graph command can rebuild the exact model later.
    pub fn save_config(&self, cfg: &RunConfig, id: &str) -> Result<()> {
        let path = self.dir.join(format!("{id}.json"));
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(())
    }

    /// Load the run configuration saved for `id`.
    pub fn load_config(&self, id: &str) -> Result<RunConfig> {
        let path = self.dir.join(format!("{id}.json"));
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "cannot read config from '{}'. Make sure you have run 'train' first.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Id of the most recently saved model.
    pub fn latest_id(&self) -> Result<String> {
        let path = self.dir.join("latest.json");
        let s = fs::read_to_string(&path)
            .with_context(|| "cannot find 'latest.json'. Have you run 'train' first?")?;
        Ok(serde_json::from_str::<String>(&s)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::graph_builder::extract_layer_params;
    use crate::ml::model::ClassifierConfig;
    use crate::ml::{default_device, EvalBackend};

    #[test]
    fn test_model_id_encodes_every_parameter() {
        let id = model_id(
            &[4, 8, 3],
            &[Activation::Tanh, Activation::Softmax],
            16,
            "https://example.org/iris.json",
            80.0,
            42,
        );
        assert_eq!(
            id,
            "4-8-3__tanh-softmax__16__80__42__https___example_org_iris_json"
        );
    }

    #[test]
    fn test_different_seeds_give_different_ids() {
        let a = model_id(&[2, 2], &[Activation::Softmax], 8, "d.json", 80.0, 1);
        let b = model_id(&[2, 2], &[Activation::Softmax], 8, "d.json", 80.0, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_save_and_load_round_trips_weights() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path().to_str().unwrap());
        let device = default_device();

        let cfg = ClassifierConfig::new(
            vec![3, 2],
            vec![Activation::Softmax],
        );
        let trained = cfg.init::<EvalBackend>(&device);
        let (saved_weights, _) = extract_layer_params(&trained).unwrap();

        manager.save_model(&trained, "test-model").unwrap();
        assert_eq!(manager.latest_id().unwrap(), "test-model");

        // fresh model with different random init, then restore.
        // CompactRecorder stores half precision, so compare up
        // to f16 resolution instead of bit-exactly.
        let fresh = cfg.init::<EvalBackend>(&device);
        let restored = manager.load_model(fresh, "test-model", &device).unwrap();
        let (loaded_weights, _) = extract_layer_params(&restored).unwrap();
        assert_eq!(loaded_weights.len(), saved_weights.len());
        for (loaded, saved) in loaded_weights[0].iter().zip(&saved_weights[0]) {
            assert!(
                (loaded - saved).abs() < 1e-3,
                "restored weight {loaded} drifted from {saved}"
            );
        }
    }

    #[test]
    fn test_missing_checkpoint_errors() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path().to_str().unwrap());
        let model = ClassifierConfig::new(vec![2, 2], vec![Activation::Softmax])
            .init::<EvalBackend>(&default_device());
        assert!(manager.load_model(model, "nonexistent", &default_device()).is_err());
        assert!(manager.latest_id().is_err());
    }
}
