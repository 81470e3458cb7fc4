use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Names of raw snapshots already folded into the summary.
///
/// Owned by whoever drives aggregation; lives as long as that owner does.
#[derive(Debug, Default, Clone)]
pub struct FileTracker {
    processed: HashSet<String>,
}

impl FileTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_processed(&self, path: &Path) -> bool {
        file_key(path).is_some_and(|name| self.processed.contains(name))
    }

    /// Files from `candidates` not yet processed, order preserved
    pub fn unseen(&self, candidates: &[PathBuf]) -> Vec<PathBuf> {
        candidates
            .iter()
            .filter(|p| !self.is_processed(p))
            .cloned()
            .collect()
    }

    pub fn mark_processed<'a, I>(&mut self, files: I)
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        for file in files {
            if let Some(name) = file_key(file) {
                self.processed.insert(name.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

fn file_key(path: &Path) -> Option<&str> {
    path.file_name().and_then(|f| f.to_str())
}
