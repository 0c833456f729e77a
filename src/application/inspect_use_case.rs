// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Answers "what does this dataset look like once framed for
// training?" without training anything:
//
//   Step 1: Load the DataSource       (Layer 4 - loader)
//   Step 2: Validate + derive schemas (Layer 4 - dataset)
//   Step 3: Split with the requested
//           percentage and seed       (Layer 4 - splitter)
//
// The report carries everything a frontend header bar would
// show: schemas, shapes, and train/test counts.

use anyhow::Result;

use crate::data::dataset::Dataset;
use crate::data::loader::source_for;

pub struct InspectConfig {
    pub dataset: String,
    pub label_name: String,
    pub train_percent: f64,
    pub shuffle_seed: i64,
}

/// What `inspect` reports back to the CLI.
pub struct InspectReport {
    pub name: String,
    pub description: Option<String>,
    pub record_count: usize,
    pub feature_schema: Vec<String>,
    pub label_schema: Vec<String>,
    pub train_count: usize,
    pub test_count: usize,
}

pub struct InspectUseCase {
    config: InspectConfig,
}

impl InspectUseCase {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<InspectReport> {
        let cfg = &self.config;

        let source = source_for(&cfg.dataset).load()?;
        let dataset = Dataset::new(source, &cfg.label_name, cfg.train_percent, cfg.shuffle_seed)?;
        let counts = dataset.counts();
        tracing::debug!("Inspecting with label attribute \"{}\"", dataset.label_name());

        Ok(InspectReport {
            name: dataset.source().name.clone(),
            description: dataset.source().description.clone(),
            record_count: dataset.source().data.len(),
            feature_schema: dataset.feature_schema().to_vec(),
            label_schema: dataset.label_schema().to_vec(),
            train_count: counts.train,
            test_count: counts.test,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_inspect_reports_schemas_and_counts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "demo",
                "data": [
                    {{"b": 1.0, "a": 2.0, "label": "yes"}},
                    {{"b": 3.0, "a": 4.0, "label": "no"}},
                    {{"b": 5.0, "a": 6.0, "label": "yes"}},
                    {{"b": 7.0, "a": 8.0, "label": "no"}}
                ]
            }}"#
        )
        .unwrap();

        let use_case = InspectUseCase::new(InspectConfig {
            dataset: file.path().to_str().unwrap().to_string(),
            label_name: "label".to_string(),
            train_percent: 75.0,
            shuffle_seed: 0,
        });
        let report = use_case.execute().unwrap();

        assert_eq!(report.name, "demo");
        assert_eq!(report.record_count, 4);
        assert_eq!(report.feature_schema, vec!["a", "b"]);
        assert_eq!(report.label_schema, vec!["no", "yes"]);
        assert_eq!((report.train_count, report.test_count), (3, 1));
    }
}
