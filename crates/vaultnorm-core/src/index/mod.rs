//! Document index: basename and primary-title lookups over a corpus snapshot

mod builder;
mod types;

pub use builder::IndexBuilder;
pub use types::{DocId, DocumentIndex, IndexEntry};
