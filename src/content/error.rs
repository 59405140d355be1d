//! Content error types.

use std::path::PathBuf;
use thiserror::Error;

/// Authoring mistakes found while ingesting or querying content.
///
/// None of these are transient: each one needs a human to fix the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("malformed front matter: {0}")]
    MalformedFrontMatter(String),

    #[error("missing required field `{0}`")]
    MissingRequiredField(&'static str),

    #[error("field `{field}` must be {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("document body is empty")]
    EmptyBody,

    #[error("slug `{slug}` is already taken by `{}`", existing.display())]
    DuplicateSlug { slug: String, existing: PathBuf },

    #[error("no document with slug `{0}`")]
    NotFound(String),
}

impl ContentError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFrontMatter(reason.into())
    }
}

/// A [`ContentError`] tied to the file it came from.
#[derive(Debug, Error)]
#[error("`{}` is invalid", path.display())]
pub struct SourceError {
    pub path: PathBuf,
    #[source]
    pub error: ContentError,
}

impl SourceError {
    pub const fn new(path: PathBuf, error: ContentError) -> Self {
        Self { path, error }
    }
}
