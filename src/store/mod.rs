mod seed;

use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};

use crate::models::Sheet;

pub use seed::seed_sheet;

/// Server-side holder of the single sheet document.
///
/// Cloning the handle shares the same document. State lives only in memory
/// and is lost when the process exits. Concurrent replaces are last-write-wins.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    doc: Arc<RwLock<Sheet>>,
}

impl DocumentStore {
    pub fn new(initial: Sheet) -> Self {
        Self {
            doc: Arc::new(RwLock::new(initial)),
        }
    }

    /// Store initialized with the built-in seed document.
    pub fn seeded() -> Self {
        Self::new(seed_sheet())
    }

    /// Current document, unchanged.
    pub fn get(&self) -> Sheet {
        self.doc.read().expect("document lock poisoned").clone()
    }

    /// Overwrite the stored document verbatim. No merge, no versioning.
    pub fn replace(&self, sheet: Sheet) {
        let mut doc = self.doc.write().expect("document lock poisoned");
        *doc = sheet;
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Read a seed document from a JSON file.
pub fn load_seed(path: &Path) -> Result<Sheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let sheet = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
    Ok(sheet)
}
