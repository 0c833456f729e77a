// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch —
// the raw data for plotting loss curves.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: average cross-entropy loss over the epoch's
//                 training batches
//   - test_loss:  cross-entropy loss on the held-out test set
//                 (NaN when the test set is empty)
//
// Output file: {dir}/metrics.csv. The header is written once;
// later runs append, so one file accumulates the history of a
// working session.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: usize,
    pub train_loss: f64,
    pub test_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, test_loss: f64) -> Self {
        Self {
            epoch,
            train_loss,
            test_loss,
        }
    }
}

/// Appends epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,test_loss")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.train_loss, m.test_loss)?;

        tracing::debug!(
            "Logged epoch {}: train_loss={:.4}, test_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.test_loss,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();

        let logger = MetricsLogger::new(path.clone()).unwrap();
        logger.log(&EpochMetrics::new(1, 0.9, 1.0)).unwrap();

        // a second logger over the same dir must not rewrite the header
        let logger = MetricsLogger::new(path).unwrap();
        logger.log(&EpochMetrics::new(2, 0.8, 0.9)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "epoch,train_loss,test_loss");
        assert!(lines[1].starts_with("1,0.900000"));
        assert!(lines[2].starts_with("2,0.800000"));
    }
}
