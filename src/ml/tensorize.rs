// ============================================================
// Layer 5 — Matrix → Tensor Lifting
// ============================================================
// The data layer hands over framework-free row-major f32
// matrices; this module puts them on a Burn device and pulls
// results back off. Keeping the conversion in one place means
// the rest of Layer 5 never builds tensors from raw Vecs.
//
// Reference: Burn Book §3 (Tensors)

use anyhow::{anyhow, Result};
use burn::prelude::*;
use burn::tensor::TensorData;

use crate::data::dataset::Matrix;

/// A [rows, cols] float tensor from a data-layer matrix.
pub fn matrix_to_tensor<B: Backend>(matrix: &Matrix, device: &B::Device) -> Tensor<B, 2> {
    Tensor::from_data(
        TensorData::new(matrix.data.clone(), [matrix.rows, matrix.cols]),
        device,
    )
}

/// Class index per row of a one-hot matrix (position of the
/// row maximum). This is how one-hot training targets turn
/// into the index targets the cross-entropy loss expects.
pub fn class_indices(one_hot: &Matrix) -> Vec<i64> {
    (0..one_hot.rows)
        .map(|r| {
            let row = one_hot.row(r);
            row.iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i as i64)
                .unwrap_or(0)
        })
        .collect()
}

/// A [rows] int tensor of class indices from a one-hot matrix.
pub fn one_hot_to_targets<B: Backend>(one_hot: &Matrix, device: &B::Device) -> Tensor<B, 1, Int> {
    let indices = class_indices(one_hot);
    let rows = indices.len();
    Tensor::from_data(TensorData::new(indices, [rows]), device)
}

/// All elements of a float tensor as f32, row-major.
pub fn float_vec<B: Backend>(tensor: Tensor<B, 2>) -> Result<Vec<f32>> {
    tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("cannot read float tensor data: {e:?}"))
}

/// All elements of a 1-d float tensor as f32.
pub fn float_vec_1d<B: Backend>(tensor: Tensor<B, 1>) -> Result<Vec<f32>> {
    tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("cannot read float tensor data: {e:?}"))
}

/// All elements of a 1-d int tensor as i64.
pub fn int_vec<B: Backend>(tensor: Tensor<B, 1, Int>) -> Result<Vec<i64>> {
    tensor
        .into_data()
        .convert::<i64>()
        .to_vec::<i64>()
        .map_err(|e| anyhow!("cannot read int tensor data: {e:?}"))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{default_device, EvalBackend};

    #[test]
    fn test_matrix_round_trips_through_tensor() {
        let matrix = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 2);
        let tensor = matrix_to_tensor::<EvalBackend>(&matrix, &default_device());
        assert_eq!(tensor.dims(), [2, 2]);
        assert_eq!(float_vec(tensor).unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_class_indices_from_one_hot() {
        let one_hot = Matrix::from_rows(
            vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]],
            3,
        );
        assert_eq!(class_indices(&one_hot), vec![1, 0, 2]);
    }

    #[test]
    fn test_targets_tensor_matches_indices() {
        let one_hot = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]], 2);
        let targets = one_hot_to_targets::<EvalBackend>(&one_hot, &default_device());
        assert_eq!(int_vec(targets).unwrap(), vec![1, 0]);
    }
}
