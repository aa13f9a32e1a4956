use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use super::Corpus;
use crate::error::{NormError, Result};

/// In-memory corpus fixture.
///
/// Documents are stored as raw bytes so tests can include undecodable files, and
/// individual paths can be made to fail on write.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    read_only: BTreeSet<String>,
    writes: Cell<usize>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, path: &str, text: &str) -> Self {
        self.with_bytes(path, text.as_bytes().to_vec())
    }

    pub fn with_bytes(self, path: &str, bytes: Vec<u8>) -> Self {
        self.files.borrow_mut().insert(path.to_string(), bytes);
        self
    }

    /// Make writes to `path` fail
    pub fn with_read_only(mut self, path: &str) -> Self {
        self.read_only.insert(path.to_string());
        self
    }

    /// Current text of a document
    pub fn text(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl Corpus for MemoryCorpus {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.files.borrow().keys().cloned().collect())
    }

    fn read(&self, path: &str) -> Result<String> {
        let files = self.files.borrow();
        let bytes = files
            .get(path)
            .ok_or_else(|| NormError::not_found("document", path))?;
        String::from_utf8(bytes.clone()).map_err(|_| NormError::NotText {
            path: path.to_string(),
        })
    }

    fn write(&self, path: &str, contents: &str) -> Result<()> {
        if self.read_only.contains(path) {
            return Err(NormError::io_operation(
                "write",
                path,
                "permission denied",
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.as_bytes().to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
