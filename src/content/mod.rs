//! Content ingestion: front matter, validation, and the document registry.
//!
//! # Pipeline
//!
//! ```text
//! raw text ──► frontmatter::parse() ──► (Metadata, body)
//!                                            │
//!                                            ▼
//!                                   validate::validate() ──► Document
//!                                                               │
//!                                                               ▼
//!                                                      Registry::add()
//!                                                      (slug, excerpt, order)
//! ```
//!
//! Parsing and validation are pure and run per file in parallel; only
//! `Registry::add` is sequential because slugs must be unique.

mod document;
mod error;
pub mod frontmatter;
mod metadata;
mod registry;
pub mod validate;

pub use document::{Document, TagSet};
pub use error::{ContentError, SourceError};
pub use metadata::{MetaValue, Metadata};
pub use registry::{Post, Registry, Visibility};
