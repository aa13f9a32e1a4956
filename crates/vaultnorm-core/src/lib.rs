//! Vaultnorm Core Library
//!
//! Document-graph normalization for markdown knowledge bases: index the corpus,
//! resolve broken reference names, rewrite references and repair metadata.

pub mod check;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod format;
pub mod index;
pub mod logging;
pub mod pipeline;
pub mod reference;
pub mod repair;
pub mod report;
pub mod resolve;
pub mod rewrite;
