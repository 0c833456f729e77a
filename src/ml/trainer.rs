// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Adam over mini-batches sliced from the train matrices.
// After every epoch the test loss is measured, the epoch
// counter advances, and the pair of losses goes to the
// metrics CSV.
//
// Training runs on the autodiff backend; evaluation uses
// model.valid() on the inner backend so the test pass carries
// no gradient overhead.
//
// Reference: Kingma & Ba (2015) Adam
//            Burn Book §5 (Training)

use anyhow::{ensure, Result};
use burn::{
    module::AutodiffModule,
    nn::loss::CrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::RunConfig;
use crate::data::dataset::Dataset;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::evaluate::evaluate_loss;
use crate::ml::model::Classifier;
use crate::ml::tensorize::{matrix_to_tensor, one_hot_to_targets};
use crate::ml::{default_device, EvalBackend, TrainBackend};

/// What a finished run hands back to the use case.
pub struct TrainOutcome {
    pub model: Classifier<TrainBackend>,
    pub final_train_loss: f64,
    /// NaN when the test set is empty
    pub final_test_loss: f64,
}

pub fn run_training(
    cfg: &RunConfig,
    mut model: Classifier<TrainBackend>,
    dataset: &Dataset,
    metrics: &MetricsLogger,
) -> Result<TrainOutcome> {
    let device = default_device();
    let n_train = dataset.train_inputs().rows;
    ensure!(
        n_train > 0,
        "train set is empty — raise the train percentage"
    );
    ensure!(cfg.batch_size > 0, "batch size must be at least 1");

    // ── Train tensors (autodiff backend) ──────────────────────────────────────
    let train_inputs = matrix_to_tensor::<TrainBackend>(dataset.train_inputs(), &device);
    let train_targets = one_hot_to_targets::<TrainBackend>(dataset.train_outputs(), &device);

    // ── Test tensors (inner backend, built once) ──────────────────────────────
    let test_batch = (!dataset.test_inputs().is_empty()).then(|| {
        (
            matrix_to_tensor::<EvalBackend>(dataset.test_inputs(), &device),
            one_hot_to_targets::<EvalBackend>(dataset.test_outputs(), &device),
        )
    });
    if test_batch.is_none() {
        tracing::warn!("Test set is empty; test loss will not be reported");
    }

    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    let mut final_train_loss = f64::NAN;
    let mut final_test_loss = f64::NAN;

    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches = 0usize;

        let mut start = 0usize;
        while start < n_train {
            let end = (start + cfg.batch_size).min(n_train);
            let inputs = train_inputs.clone().slice([start..end]);
            let targets = train_targets.clone().slice([start..end]);

            let logits = model.forward_logits(inputs);
            let loss = CrossEntropyLossConfig::new()
                .init(&logits.device())
                .forward(logits, targets);

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches += 1;

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(cfg.lr, model, grads);

            start = end;
        }

        let train_loss = loss_sum / batches as f64;

        let test_loss = match &test_batch {
            Some((inputs, targets)) => {
                // dropout-free deterministic pass on the inner backend
                let eval_model = model.valid();
                evaluate_loss(&eval_model, inputs.clone(), targets.clone())?
            }
            None => f64::NAN,
        };

        metrics.log(&EpochMetrics::new(epoch, train_loss, test_loss))?;
        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | test_loss={:.4}",
            epoch, cfg.epochs, train_loss, test_loss,
        );

        final_train_loss = train_loss;
        final_test_loss = test_loss;
    }

    tracing::info!("Training complete after {} epochs", cfg.epochs);
    Ok(TrainOutcome {
        model,
        final_train_loss,
        final_test_loss,
    })
}
