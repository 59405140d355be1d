//! Validated documents.

use super::{
    error::SourceError,
    frontmatter,
    metadata::Metadata,
    validate::{FrontMatter, validate},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Tags of a document.
///
/// Keeps the authored order for display, drops duplicates, and compares
/// equal regardless of order.
#[derive(Debug, Clone, Default, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|tag| other.contains(tag))
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in iter {
            let tag = tag.into();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        Self(tags)
    }
}

/// One authored article, validated and immutable.
#[derive(Debug, Clone)]
pub struct Document {
    source: PathBuf,
    raw: String,
    metadata: Metadata,
    front: FrontMatter,
    body: String,
}

impl Document {
    /// Parse and validate the raw text of `source`.
    pub fn parse(source: PathBuf, raw: String) -> Result<Self, SourceError> {
        let checked = frontmatter::parse(&raw).and_then(|(metadata, body)| {
            let front = validate(&metadata, body)?;
            Ok((metadata, front, body.to_owned()))
        });

        match checked {
            Ok((metadata, front, body)) => Ok(Self {
                source,
                raw,
                metadata,
                front,
                body,
            }),
            Err(error) => Err(SourceError::new(source, error)),
        }
    }

    /// Path of the file this document was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Full unparsed text, front matter included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All declared front-matter keys, recognized or not.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn title(&self) -> &str {
        &self.front.title
    }

    pub const fn date(&self) -> NaiveDate {
        self.front.date
    }

    pub const fn tags(&self) -> &TagSet {
        &self.front.tags
    }

    pub const fn published(&self) -> bool {
        self.front.published
    }

    pub fn layout(&self) -> Option<&str> {
        self.front.layout.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::error::ContentError;

    fn parse(raw: &str) -> Result<Document, SourceError> {
        Document::parse(PathBuf::from("content/post.md"), raw.to_owned())
    }

    #[test]
    fn test_tag_set_dedupes_and_keeps_order() {
        let tags: TagSet = ["nodejs", "mongodb", "nodejs"].into_iter().collect();
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["nodejs", "mongodb"]);
    }

    #[test]
    fn test_tag_set_equality_ignores_order() {
        let a: TagSet = ["a", "b"].into_iter().collect();
        let b: TagSet = ["b", "a"].into_iter().collect();
        let c: TagSet = ["a"].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_document_parse() {
        let doc = parse(
            "---\ntitle: Streams in NodeJS\ndate: 2019-10-12\ntags: [nodejs]\nseries: streams\n---\n\nPipe all the things.\n",
        )
        .unwrap();

        assert_eq!(doc.title(), "Streams in NodeJS");
        assert_eq!(doc.date(), NaiveDate::from_ymd_opt(2019, 10, 12).unwrap());
        assert!(doc.tags().contains("nodejs"));
        assert!(!doc.published());
        assert_eq!(doc.layout(), None);
        assert_eq!(doc.body(), "Pipe all the things.\n");
        assert!(doc.metadata().get("series").is_some());
        assert!(doc.raw().starts_with("---\ntitle"));
    }

    #[test]
    fn test_document_parse_error_names_file() {
        let err = parse("---\ntitle: a\n---\nbody").unwrap_err();
        assert_eq!(err.path, PathBuf::from("content/post.md"));
        assert_eq!(err.error, ContentError::MissingRequiredField("date"));
    }

    #[test]
    fn test_document_round_trip() {
        let doc = parse("---\ntitle: A\ndate: 2020-02-02\npublished: true\n---\nbody\n").unwrap();
        let source = frontmatter::to_source(doc.metadata(), doc.body()).unwrap();
        let again = parse(&source).unwrap();
        assert_eq!(doc.metadata(), again.metadata());
        assert_eq!(doc.body(), again.body());
        assert_eq!(doc.title(), again.title());
        assert_eq!(doc.published(), again.published());
    }
}
