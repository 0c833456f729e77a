// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads a DataSource from either a local JSON file or an HTTP
// URL. Both loaders implement the RecordSource trait from
// Layer 3, so everything above this module is indifferent to
// where the bytes came from.
//
// The JSON format is described in domain/record.rs. Parsing
// errors carry the file path / URL so the user knows which
// input to fix. No validation happens here — that is the
// validator's job, and it runs inside Dataset::new.
//
// Reference: Rust Book §9 (Error Handling)
//            ureq crate documentation

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::record::DataSource;
use crate::domain::traits::RecordSource;

/// Loads a dataset from a JSON file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FileSource {
    fn load(&self) -> Result<DataSource> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read dataset file '{}'", self.path.display()))?;
        let source: DataSource = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid dataset file", self.path.display()))?;
        tracing::info!(
            "Loaded dataset \"{}\" ({} records) from '{}'",
            source.name,
            source.data.len(),
            self.path.display(),
        );
        Ok(source)
    }
}

/// Loads a dataset with an HTTP GET of a JSON document.
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl RecordSource for HttpSource {
    fn load(&self) -> Result<DataSource> {
        let response = ureq::get(&self.url)
            .call()
            .with_context(|| format!("GET {} failed", self.url))?;
        let source: DataSource = response
            .into_json()
            .with_context(|| format!("response from {} is not a valid dataset", self.url))?;
        tracing::info!(
            "Loaded dataset \"{}\" ({} records) from {}",
            source.name,
            source.data.len(),
            self.url,
        );
        Ok(source)
    }
}

/// Pick the right loader for a CLI dataset argument:
/// anything starting with http:// or https:// goes over the
/// network, everything else is treated as a path.
pub fn source_for(dataset: &str) -> Box<dyn RecordSource> {
    if dataset.starts_with("http://") || dataset.starts_with("https://") {
        Box::new(HttpSource::new(dataset))
    } else {
        Box::new(FileSource::new(dataset))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_source_parses_dataset_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "tiny",
                "description": "two records",
                "data": [
                    {{"x": 1.0, "label": "a"}},
                    {{"x": 2.0, "label": "b"}}
                ]
            }}"#
        )
        .unwrap();

        let source = FileSource::new(file.path()).load().unwrap();
        assert_eq!(source.name, "tiny");
        assert_eq!(source.data.len(), 2);
    }

    #[test]
    fn test_file_source_missing_file_errors() {
        let result = FileSource::new("/no/such/dataset.json").load();
        assert!(result.is_err());
    }

    #[test]
    fn test_file_source_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(FileSource::new(file.path()).load().is_err());
    }
}
