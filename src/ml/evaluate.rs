// ============================================================
// Layer 5 — Evaluation
// ============================================================
// Loss, predictions and the confusion matrix / per-class
// accuracy the playground shows next to the network diagram.
//
// Everything here is generic over the backend so the trainer
// can evaluate on the inner (non-autodiff) backend while the
// same functions serve standalone inference.
//
// Reference: Burn Book §5 (Metrics)

use anyhow::Result;
use burn::nn::loss::CrossEntropyLossConfig;
use burn::prelude::*;

use crate::ml::model::Classifier;
use crate::ml::tensorize::int_vec;

/// Mean cross-entropy loss of `model` on the given batch.
pub fn evaluate_loss<B: Backend>(
    model: &Classifier<B>,
    inputs: Tensor<B, 2>,
    targets: Tensor<B, 1, Int>,
) -> Result<f64> {
    let logits = model.forward_logits(inputs);
    let loss = CrossEntropyLossConfig::new()
        .init(&logits.device())
        .forward(logits, targets);
    Ok(loss.into_scalar().elem::<f64>())
}

/// Predicted class index per input row.
pub fn predict_classes<B: Backend>(
    model: &Classifier<B>,
    inputs: Tensor<B, 2>,
) -> Result<Vec<usize>> {
    let logits = model.forward_logits(inputs);
    // argmax(1) keeps the reduced dim as [rows, 1] — flatten to [rows]
    let predicted = logits.argmax(1).flatten::<1>(0, 1);
    Ok(int_vec(predicted)?.into_iter().map(|i| i as usize).collect())
}

/// confusion[actual][predicted] = count.
pub fn confusion_matrix(predicted: &[usize], actual: &[usize], n_classes: usize) -> Vec<Vec<usize>> {
    let mut matrix = vec![vec![0usize; n_classes]; n_classes];
    for (&p, &a) in predicted.iter().zip(actual.iter()) {
        if a < n_classes && p < n_classes {
            matrix[a][p] += 1;
        }
    }
    matrix
}

/// Diagonal share per row of the confusion matrix.
/// Classes with no samples report an accuracy of 0.
pub fn per_class_accuracy(confusion: &[Vec<usize>]) -> Vec<f64> {
    confusion
        .iter()
        .enumerate()
        .map(|(class, row)| {
            let total: usize = row.iter().sum();
            if total == 0 {
                0.0
            } else {
                row[class] as f64 / total as f64
            }
        })
        .collect()
}

/// Overall fraction of correct predictions.
pub fn overall_accuracy(confusion: &[Vec<usize>]) -> f64 {
    let total: usize = confusion.iter().map(|row| row.iter().sum::<usize>()).sum();
    if total == 0 {
        return 0.0;
    }
    let correct: usize = confusion
        .iter()
        .enumerate()
        .map(|(class, row)| row[class])
        .sum();
    correct as f64 / total as f64
}

/// Plain-text confusion table with label names and per-class
/// accuracy, for the CLI report.
pub fn render_confusion(confusion: &[Vec<usize>], labels: &[String]) -> String {
    let width = labels
        .iter()
        .map(|label| label.len())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut out = String::new();
    out.push_str(&format!("{:>width$} |", "actual\\pred"));
    for label in labels {
        out.push_str(&format!(" {label:>width$}"));
    }
    out.push_str(&format!(" {:>width$}\n", "accuracy"));

    let accuracy = per_class_accuracy(confusion);
    for (i, row) in confusion.iter().enumerate() {
        out.push_str(&format!("{:>width$} |", labels[i]));
        for count in row {
            out.push_str(&format!(" {count:>width$}"));
        }
        out.push_str(&format!(" {:>width$.3}\n", accuracy[i]));
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::{Activation, ClassifierConfig};
    use crate::ml::{default_device, EvalBackend};
    use burn::tensor::TensorData;

    #[test]
    fn test_confusion_counts_land_in_actual_rows() {
        let predicted = [0, 1, 1, 2, 0];
        let actual = [0, 1, 2, 2, 1];
        let matrix = confusion_matrix(&predicted, &actual, 3);
        assert_eq!(matrix[0], vec![1, 0, 0]);
        assert_eq!(matrix[1], vec![1, 1, 0]);
        assert_eq!(matrix[2], vec![0, 1, 1]);
    }

    #[test]
    fn test_per_class_and_overall_accuracy() {
        let matrix = vec![vec![2, 0], vec![1, 1]];
        assert_eq!(per_class_accuracy(&matrix), vec![1.0, 0.5]);
        assert!((overall_accuracy(&matrix) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_class_reports_zero_accuracy() {
        let matrix = vec![vec![0, 0], vec![0, 3]];
        assert_eq!(per_class_accuracy(&matrix)[0], 0.0);
    }

    #[test]
    fn test_render_names_every_label() {
        let matrix = vec![vec![1, 0], vec![0, 1]];
        let labels = vec!["no".to_string(), "yes".to_string()];
        let table = render_confusion(&matrix, &labels);
        assert!(table.contains("no"));
        assert!(table.contains("yes"));
        assert!(table.contains("accuracy"));
    }

    #[test]
    fn test_predict_returns_one_class_per_row() {
        let device = default_device();
        let model = ClassifierConfig::new(
            vec![2, 3],
            vec![Activation::Softmax],
        )
        .init::<EvalBackend>(&device);
        let inputs = Tensor::<EvalBackend, 2>::from_data(
            TensorData::new(vec![0.5f32, -1.0, 2.0, 0.0], [2, 2]),
            &device,
        );
        let classes = predict_classes(&model, inputs).unwrap();
        assert_eq!(classes.len(), 2);
        assert!(classes.iter().all(|&c| c < 3));
    }
}
