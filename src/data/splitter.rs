// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Optionally shuffles records with a seeded deterministic
// shuffle, then partitions them into train and test sets by
// ratio.
//
// Why a SEEDED shuffle instead of thread_rng()?
//   The playground reconstructs its state from a bookmark:
//   the same dataset, seed and ratio must reproduce the same
//   partition on every run, otherwise saved checkpoints would
//   be evaluated against a different test set than the one
//   held out during training.
//
// Seed semantics:
//   seed > 0  → Fisher-Yates over a copy, driven by an
//               injected IndexSampler (StdRng in production)
//   seed <= 0 → no shuffle at all; the original record order
//               is preserved and train+test concatenated
//               reproduce the input exactly
//
// Partition law:
//   test_len  = floor(n * test_ratio)
//   train_len = n - test_len
//   train = leading records, test = trailing records
//
// Reference: Knuth TAOCP Vol 2 (Algorithm P, Fisher-Yates)
//            rand crate documentation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::traits::IndexSampler;

/// The production sampler: a StdRng seeded from the split seed.
/// Same seed → same index sequence → same permutation.
pub struct SeededSampler {
    rng: StdRng,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IndexSampler for SeededSampler {
    fn next_index(&mut self, max_exclusive: usize) -> usize {
        self.rng.gen_range(0..max_exclusive)
    }
}

/// In-place Fisher-Yates driven by `sampler`.
///
/// Walks from the back, swapping each position with a sampled
/// position at or before it. Every permutation is reachable
/// and, with a deterministic sampler, reproducible.
pub fn shuffle_with<T>(items: &mut [T], sampler: &mut dyn IndexSampler) {
    for i in (1..items.len()).rev() {
        let j = sampler.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Split `records` into (train, test).
///
/// `test_ratio` is clamped to [0.0, 1.0]; a ratio of 0 gives
/// an empty test set, a ratio of 1 an empty train set, and an
/// empty input gives two empty outputs without error.
pub fn split_train_test<T: Clone>(
    records: &[T],
    test_ratio: f64,
    seed: i64,
) -> (Vec<T>, Vec<T>) {
    let mut ordered: Vec<T> = records.to_vec();

    if seed > 0 {
        let mut sampler = SeededSampler::new(seed as u64);
        shuffle_with(&mut ordered, &mut sampler);
    }

    let ratio = test_ratio.clamp(0.0, 1.0);
    let test_len = (ordered.len() as f64 * ratio).floor() as usize;
    let train_len = ordered.len() - test_len;

    let test = ordered.split_off(train_len);
    (ordered, test)
}
