//! Storage port for the corpus
//!
//! Every read and write of document text goes through [`Corpus`], so the pipeline runs
//! unchanged against the filesystem ([`FsCorpus`]), an in-memory fixture
//! ([`MemoryCorpus`]) or a write-discarding wrapper ([`DryRun`]).

mod fs;
mod memory;

use serde::Serialize;

use crate::document::Document;
use crate::error::Result;

pub use fs::FsCorpus;
pub use memory::MemoryCorpus;

/// Access to the documents of a corpus by corpus-relative, `/`-separated path
pub trait Corpus {
    /// Human-readable location of the corpus, for logs and summaries
    fn location(&self) -> String;

    /// Every document path with the recognized extension, sorted.
    ///
    /// Failing to enumerate the root is the only fatal corpus error.
    fn list(&self) -> Result<Vec<String>>;

    /// Read a document as UTF-8 text
    fn read(&self, path: &str) -> Result<String>;

    /// Replace a document's text
    fn write(&self, path: &str, contents: &str) -> Result<()>;
}

/// Wrapper that reads through to the inner corpus and discards writes
pub struct DryRun<'a> {
    inner: &'a dyn Corpus,
}

impl<'a> DryRun<'a> {
    pub fn new(inner: &'a dyn Corpus) -> Self {
        DryRun { inner }
    }
}

impl Corpus for DryRun<'_> {
    fn location(&self) -> String {
        self.inner.location()
    }

    fn list(&self) -> Result<Vec<String>> {
        self.inner.list()
    }

    fn read(&self, path: &str) -> Result<String> {
        self.inner.read(path)
    }

    fn write(&self, path: &str, contents: &str) -> Result<()> {
        tracing::debug!(path, bytes = contents.len(), "dry run, write discarded");
        Ok(())
    }
}

/// Stage of the run at which a document failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Read,
    Write,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Read => write!(f, "read"),
            Stage::Write => write!(f, "write"),
        }
    }
}

/// A per-document failure; recorded, never fatal to the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub path: String,
    pub stage: Stage,
    pub reason: String,
}

/// Every readable document of the corpus, loaded before any write happens
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub documents: Vec<Document>,
    pub skipped: Vec<DocumentFailure>,
}

impl Snapshot {
    /// Read and parse every listed document; unreadable ones are skipped with a diagnostic
    #[tracing::instrument(skip(corpus), fields(corpus = %corpus.location()))]
    pub fn load(corpus: &dyn Corpus) -> Result<Self> {
        let paths = corpus.list()?;
        let mut snapshot = Snapshot::default();

        for path in paths {
            match corpus.read(&path) {
                Ok(text) => snapshot.documents.push(Document::parse(path, &text)),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "skipping unreadable document");
                    snapshot.skipped.push(DocumentFailure {
                        path,
                        stage: Stage::Read,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            documents = snapshot.documents.len(),
            skipped = snapshot.skipped.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}
