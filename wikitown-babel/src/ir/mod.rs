//! Intermediate Representation (IR) for wikitown documents.
//!
//! The IR is what the markup renders into and what every output format starts from.
//! It is deliberately flat: a document is a list of blocks, one per source line, and
//! a block is either a standalone media reference or a run of inline spans.

pub mod nodes;
