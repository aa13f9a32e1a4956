use std::collections::{HashMap, HashSet};

/// Position of a document in the snapshot the index was built from
pub type DocId = usize;

/// Lookup data for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: DocId,
    pub path: String,
    pub basename: String,
    pub stem: String,
    pub title: Option<String>,
    pub aliases: Vec<String>,
}

/// Immutable index over a corpus snapshot.
///
/// Built once per run before resolution; no component mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    pub(super) entries: Vec<IndexEntry>,
    pub(super) by_basename: HashMap<String, DocId>,
    pub(super) by_title: HashMap<String, DocId>,
    pub(super) by_stem: HashMap<String, DocId>,
    pub(super) aliases: HashSet<String>,
    pub(super) extension: String,
}

impl DocumentIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recognized content extension, without the dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn entry(&self, id: DocId) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// Entries in snapshot order; `entries()[id]` describes document `id`
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Document whose file name is exactly `basename`
    pub fn by_basename(&self, basename: &str) -> Option<&IndexEntry> {
        self.by_basename.get(basename).and_then(|&id| self.entry(id))
    }

    /// Document whose primary title is exactly `title`
    pub fn by_title(&self, title: &str) -> Option<&IndexEntry> {
        self.by_title.get(title).and_then(|&id| self.entry(id))
    }

    /// Titles retained by the index with their documents
    pub fn titles(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().filter_map(move |e| {
            let title = e.title.as_deref()?;
            // only the retained holder of a shared title is listed
            (self.by_title.get(title) == Some(&e.id)).then_some((title, e))
        })
    }

    /// Whether a reference to `name` lands on an existing document by exact basename,
    /// stem, primary title or alias
    pub fn knows(&self, name: &str) -> bool {
        let name = name.trim();
        let leaf = name.rsplit('/').next().unwrap_or(name);
        [name, leaf].iter().any(|n| {
            self.by_basename.contains_key(*n)
                || self.by_stem.contains_key(*n)
                || self.by_title.contains_key(*n)
                || self.aliases.contains(*n)
        })
    }
}
