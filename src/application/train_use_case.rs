// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the dataset JSON       (Layer 4 - loader)
//   Step 2: Validate, derive schemas,
//           split, materialize tensors  (Layer 4 - dataset)
//   Step 3: Build or resume the model   (Layer 5 - model,
//                                        Layer 6 - checkpoint)
//   Step 4: Save the run config         (Layer 6 - infra)
//   Step 5: Run the training loop       (Layer 5 - trainer)
//   Step 6: Save the checkpoint         (Layer 6 - infra)
//   Step 7: Evaluate: confusion matrix
//           and per-class accuracy      (Layer 5 - evaluate)
//
// The input layer's width comes from the feature schema and
// the output layer's width from the label schema, so the user
// only ever configures the hidden layers.
//
// Reference: Clean Architecture pattern
//            Burn Book §5 (Training)

use anyhow::{ensure, Result};
use burn::module::AutodiffModule;
use serde::{Deserialize, Serialize};

use crate::data::dataset::Dataset;
use crate::data::loader::source_for;
use crate::infra::checkpoint::{model_id, CheckpointManager};
use crate::infra::metrics::MetricsLogger;
use crate::ml::evaluate::{confusion_matrix, overall_accuracy, predict_classes, render_confusion};
use crate::ml::model::{Activation, ClassifierConfig};
use crate::ml::tensorize::{class_indices, matrix_to_tensor};
use crate::ml::trainer::run_training;
use crate::ml::{default_device, TrainBackend};

// ─── Run Configuration ────────────────────────────────────────────────────────
// All parameters of a training run. Serializable so the
// checkpoint manager can store it next to the weights and the
// graph command can rebuild the exact model later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub dataset: String,
    pub label_name: String,
    /// Hidden layer widths only — input/output widths come
    /// from the dataset schemas
    pub hidden_layers: Vec<usize>,
    /// One activation per non-input layer (hidden + output)
    pub activations: Vec<Activation>,
    pub batch_size: usize,
    pub epochs: usize,
    pub lr: f64,
    pub train_percent: f64,
    pub shuffle_seed: i64,
    pub checkpoint_dir: String,
    /// Continue from the checkpoint with this run's model id
    pub resume: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dataset: "data/iris.json".to_string(),
            label_name: "label".to_string(),
            hidden_layers: vec![8],
            activations: vec![Activation::Tanh, Activation::Softmax],
            batch_size: 16,
            epochs: 50,
            lr: 1e-2,
            train_percent: 80.0,
            shuffle_seed: 0,
            checkpoint_dir: "checkpoints".to_string(),
            resume: false,
        }
    }
}

impl RunConfig {
    /// Full network shape for the given dataset dimensions.
    pub fn layer_sizes(&self, input_shape: usize, output_shape: usize) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(input_shape);
        sizes.extend_from_slice(&self.hidden_layers);
        sizes.push(output_shape);
        sizes
    }
}

/// What a finished `train` run reports back to the CLI.
pub struct TrainReport {
    pub model_id: String,
    pub train_count: usize,
    pub test_count: usize,
    pub final_train_loss: f64,
    pub final_test_loss: f64,
    /// Accuracy over the evaluation set (test, or train when
    /// the test set is empty)
    pub accuracy: f64,
    pub confusion_table: String,
    pub metrics_csv: String,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: RunConfig,
}

impl TrainUseCase {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1+2: Load and frame the dataset ──────────────────────────────
        let source = source_for(&cfg.dataset).load()?;
        let dataset = Dataset::new(source, &cfg.label_name, cfg.train_percent, cfg.shuffle_seed)?;
        let counts = dataset.counts();
        tracing::info!("Split: {} train, {} test", counts.train, counts.test);

        let layer_sizes = cfg.layer_sizes(dataset.input_shape(), dataset.output_shape());
        ensure!(
            cfg.activations.len() == layer_sizes.len() - 1,
            "expected {} activations for shape {:?}, got {}",
            layer_sizes.len() - 1,
            layer_sizes,
            cfg.activations.len(),
        );

        // ── Step 3: Build or resume the model ─────────────────────────────────
        let device = default_device();
        let model_cfg = ClassifierConfig::new(layer_sizes.clone(), cfg.activations.clone());
        let mut model = model_cfg.init::<TrainBackend>(&device);

        let id = model_id(
            &layer_sizes,
            &cfg.activations,
            cfg.batch_size,
            &cfg.dataset,
            cfg.train_percent,
            cfg.shuffle_seed,
        );
        let checkpoints = CheckpointManager::new(&cfg.checkpoint_dir);
        if cfg.resume {
            ensure!(
                checkpoints.has_model(&id),
                "cannot resume: no checkpoint for '{}' in '{}'",
                id,
                cfg.checkpoint_dir,
            );
            model = checkpoints.load_model(model, &id, &device)?;
            tracing::info!("Resumed from checkpoint '{}'", id);
        }

        // ── Step 4: Save the run config ───────────────────────────────────────
        checkpoints.save_config(cfg, &id)?;

        // ── Step 5: Train ─────────────────────────────────────────────────────
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;
        let outcome = run_training(cfg, model, &dataset, &metrics)?;

        // ── Step 6: Checkpoint the trained weights ────────────────────────────
        checkpoints.save_model(&outcome.model, &id)?;

        // ── Step 7: Confusion matrix on held-out data ─────────────────────────
        // Falls back to the train set when there is no test set,
        // so the report is never empty.
        let eval_model = outcome.model.valid();
        let (eval_inputs, eval_outputs) = if dataset.test_inputs().is_empty() {
            (dataset.train_inputs(), dataset.train_outputs())
        } else {
            (dataset.test_inputs(), dataset.test_outputs())
        };
        let inputs = matrix_to_tensor(eval_inputs, &device);
        let predicted = predict_classes(&eval_model, inputs)?;
        let actual: Vec<usize> = class_indices(eval_outputs)
            .into_iter()
            .map(|i| i as usize)
            .collect();
        let confusion = confusion_matrix(&predicted, &actual, dataset.output_shape());

        Ok(TrainReport {
            model_id: id,
            train_count: counts.train,
            test_count: counts.test,
            final_train_loss: outcome.final_train_loss,
            final_test_loss: outcome.final_test_loss,
            accuracy: overall_accuracy(&confusion),
            confusion_table: render_confusion(&confusion, dataset.label_schema()),
            metrics_csv: metrics.csv_path().display().to_string(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_blob_dataset(records: usize) -> tempfile::NamedTempFile {
        let mut rows = Vec::new();
        for i in 0..records {
            let (offset, label) = if i % 2 == 0 { (3.0, "pos") } else { (-3.0, "neg") };
            rows.push(format!(
                r#"{{"x": {}, "y": {}, "label": "{}"}}"#,
                offset + i as f64 * 0.01,
                offset,
                label
            ));
        }
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "blobs", "data": [{}]}}"#,
            rows.join(",")
        )
        .unwrap();
        file
    }

    #[test]
    fn test_layer_sizes_wrap_hidden_layers() {
        let cfg = RunConfig {
            hidden_layers: vec![8, 4],
            ..RunConfig::default()
        };
        assert_eq!(cfg.layer_sizes(5, 3), vec![5, 8, 4, 3]);
    }

    #[test]
    fn test_full_pipeline_trains_and_checkpoints() {
        let data_file = write_blob_dataset(40);
        let ckpt_dir = tempfile::tempdir().unwrap();

        let cfg = RunConfig {
            dataset: data_file.path().to_str().unwrap().to_string(),
            hidden_layers: vec![4],
            activations: vec![Activation::Tanh, Activation::Softmax],
            batch_size: 8,
            epochs: 5,
            lr: 0.05,
            checkpoint_dir: ckpt_dir.path().to_str().unwrap().to_string(),
            ..RunConfig::default()
        };

        let report = TrainUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!((report.train_count, report.test_count), (32, 8));
        assert!(report.final_train_loss.is_finite());
        assert!(report.accuracy >= 0.0 && report.accuracy <= 1.0);

        // config + weights + latest pointer all landed on disk
        let checkpoints = CheckpointManager::new(cfg.checkpoint_dir.clone());
        assert_eq!(checkpoints.latest_id().unwrap(), report.model_id);
        let reloaded = checkpoints.load_config(&report.model_id).unwrap();
        assert_eq!(reloaded.epochs, 5);

        // and a second run can resume from it
        let resumed = TrainUseCase::new(RunConfig {
            resume: true,
            epochs: 1,
            ..cfg
        })
        .execute()
        .unwrap();
        assert_eq!(resumed.model_id, report.model_id);
    }

    #[test]
    fn test_resume_without_checkpoint_is_rejected() {
        let data_file = write_blob_dataset(10);
        let ckpt_dir = tempfile::tempdir().unwrap();
        let cfg = RunConfig {
            dataset: data_file.path().to_str().unwrap().to_string(),
            checkpoint_dir: ckpt_dir.path().to_str().unwrap().to_string(),
            resume: true,
            ..RunConfig::default()
        };
        assert!(TrainUseCase::new(cfg).execute().is_err());
    }

    #[test]
    fn test_activation_count_mismatch_is_rejected() {
        let data_file = write_blob_dataset(10);
        let cfg = RunConfig {
            dataset: data_file.path().to_str().unwrap().to_string(),
            hidden_layers: vec![4],
            activations: vec![Activation::Softmax],
            ..RunConfig::default()
        };
        assert!(TrainUseCase::new(cfg).execute().is_err());
    }
}
