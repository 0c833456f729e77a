// ============================================================
// Layer 6 — Bookmark Store
// ============================================================
// Named run configurations the user wants to come back to:
// dataset, network shape, activations, batch size and split
// parameters — enough to reproduce a playground session.
//
// The store is an explicit owning object constructed once and
// passed to whoever needs it, backed by a single JSON file.
// No module-level mutable state: tests construct a store over
// a temp file and exercise it in isolation.
//
// Semantics:
//   add    → appends; an existing bookmark with the same name
//            is replaced
//   remove → by name, reports whether anything was removed
//   list   → insertion order
//
// Every mutation persists immediately, so a crash never loses
// more than the operation in flight.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// One saved run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub dataset: String,
    pub hidden_layers: Vec<usize>,
    pub activations: Vec<String>,
    pub batch_size: usize,
    pub train_percent: f64,
    pub shuffle_seed: i64,
}

/// JSON-file-backed bookmark collection.
pub struct BookmarkStore {
    path: PathBuf,
    entries: Vec<Bookmark>,
}

impl BookmarkStore {
    /// Open the store at `path`, reading existing bookmarks if
    /// the file is already there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("cannot read bookmarks from '{}'", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("'{}' is not a valid bookmark file", path.display()))?
        } else {
            Vec::new()
        };
        Ok(Self { path, entries })
    }

    /// Add `bookmark`, replacing any existing entry with the
    /// same name, and persist.
    pub fn add(&mut self, bookmark: Bookmark) -> Result<()> {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == bookmark.name)
        {
            tracing::debug!("Replacing bookmark \"{}\"", bookmark.name);
            *existing = bookmark;
        } else {
            self.entries.push(bookmark);
        }
        self.persist()
    }

    /// Remove the bookmark named `name` and persist.
    /// Returns whether a bookmark was actually removed.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        let removed = self.entries.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// All bookmarks in insertion order.
    pub fn list(&self) -> &[Bookmark] {
        &self.entries
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("cannot write bookmarks to '{}'", self.path.display()))?;
        Ok(())
    }
}
