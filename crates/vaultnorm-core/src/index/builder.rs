use std::collections::hash_map::Entry;

use super::types::{DocumentIndex, IndexEntry};
use crate::document::Document;

/// Builds a [`DocumentIndex`] from loaded documents
pub struct IndexBuilder<'a> {
    documents: &'a [Document],
    index: DocumentIndex,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(documents: &'a [Document], extension: &str) -> Self {
        IndexBuilder {
            documents,
            index: DocumentIndex {
                extension: extension.trim_start_matches('.').to_string(),
                ..Default::default()
            },
        }
    }

    /// Build the index.
    ///
    /// Documents are visited in path order; on a shared basename, stem or title the
    /// first document visited is retained.
    #[tracing::instrument(skip(self), fields(documents = self.documents.len()))]
    pub fn build(mut self) -> DocumentIndex {
        let documents = self.documents;
        let mut order: Vec<usize> = (0..documents.len()).collect();
        order.sort_by(|&a, &b| documents[a].path().cmp(documents[b].path()));

        for &id in &order {
            self.add_names(id, &documents[id]);
        }

        self.index.entries = documents
            .iter()
            .enumerate()
            .map(|(id, doc)| IndexEntry {
                id,
                path: doc.path().to_string(),
                basename: doc.basename().to_string(),
                stem: doc.stem().to_string(),
                title: doc.title().map(str::to_string),
                aliases: doc.metadata().aliases(),
            })
            .collect();

        tracing::debug!(
            basenames = self.index.by_basename.len(),
            titles = self.index.by_title.len(),
            "index built"
        );
        self.index
    }

    fn add_names(&mut self, id: usize, doc: &Document) {
        match self.index.by_basename.entry(doc.basename().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
            Entry::Occupied(existing) => {
                tracing::warn!(
                    basename = doc.basename(),
                    kept = self.documents[*existing.get()].path(),
                    ignored = doc.path(),
                    "duplicate basename"
                );
            }
        }

        self.index
            .by_stem
            .entry(doc.stem().to_string())
            .or_insert(id);

        if let Some(title) = doc.title() {
            if let Entry::Vacant(slot) = self.index.by_title.entry(title.to_string()) {
                slot.insert(id);
            } else {
                tracing::debug!(title, path = doc.path(), "shared primary title");
            }
        }

        for alias in doc.metadata().aliases() {
            self.index.aliases.insert(alias);
        }
    }
}
