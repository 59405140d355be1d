//! In-memory document registry.
//!
//! Documents are added one at a time. On `add` the registry derives the
//! slug and excerpt, rejects slug collisions, and slots the post into a
//! date-ordered index so listings never need to sort.
//!
//! # Ordering
//!
//! Every listing uses the same total order:
//! 1. `date` descending (newest first)
//! 2. `title` ascending
//! 3. `slug` ascending
//!
//! Slugs are unique, so two distinct posts never compare equal and
//! pagination over a listing is stable.

use super::{document::Document, error::ContentError};
use crate::utils::{excerpt, slug::slugify};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

/// Who is asking for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Public site: unpublished documents do not exist.
    #[default]
    Public,
    /// Author preview: unpublished documents are visible.
    Preview,
}

/// A registered document with its derived fields.
#[derive(Debug, Clone)]
pub struct Post {
    document: Document,
    slug: String,
    excerpt: String,
}

impl Post {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    pub fn title(&self) -> &str {
        self.document.title()
    }

    pub const fn published(&self) -> bool {
        self.document.published()
    }

    const fn visible_to(&self, visibility: Visibility) -> bool {
        matches!(visibility, Visibility::Preview) || self.published()
    }
}

/// Listing order: newest first, then title, then slug.
fn compare(a: &Post, b: &Post) -> Ordering {
    b.document
        .date()
        .cmp(&a.document.date())
        .then_with(|| a.title().cmp(b.title()))
        .then_with(|| a.slug.cmp(&b.slug))
}

/// All documents of one build, indexed by slug and ordered by date.
#[derive(Debug, Default)]
pub struct Registry {
    posts: Vec<Post>,
    /// slug -> index into `posts`
    slugs: HashMap<String, usize>,
    /// indices into `posts`, kept sorted by [`compare`]
    order: Vec<usize>,
    excerpt_length: usize,
}

impl Registry {
    pub fn new(excerpt_length: usize) -> Self {
        Self {
            excerpt_length,
            ..Self::default()
        }
    }

    /// Register a document, deriving its slug and excerpt.
    ///
    /// Fails with `DuplicateSlug` when another document already owns the
    /// slug; the registry is left unchanged in that case.
    pub fn add(&mut self, document: Document) -> Result<&Post, ContentError> {
        let slug = slugify(document.title());
        if slug.is_empty() {
            return Err(ContentError::InvalidFieldType {
                field: "title",
                expected: "text with at least one letter or digit",
            });
        }
        if let Some(&existing) = self.slugs.get(&slug) {
            return Err(ContentError::DuplicateSlug {
                slug,
                existing: self.posts[existing].document.source().to_path_buf(),
            });
        }

        let excerpt = excerpt::first_paragraph(document.body(), self.excerpt_length);
        let index = self.posts.len();
        self.slugs.insert(slug.clone(), index);
        self.posts.push(Post {
            document,
            slug,
            excerpt,
        });

        let post = &self.posts[index];
        let position = self
            .order
            .partition_point(|&i| compare(&self.posts[i], post) == Ordering::Less);
        self.order.insert(position, index);

        Ok(&self.posts[index])
    }

    /// Every post, drafts included, in listing order.
    pub fn list_all(&self) -> impl Iterator<Item = &Post> {
        self.order.iter().map(|&index| &self.posts[index])
    }

    /// Published posts in listing order.
    pub fn list_published(&self) -> impl Iterator<Item = &Post> {
        self.list_all().filter(|post| post.published())
    }

    /// Published posts carrying `tag` (exact match), in listing order.
    pub fn find_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Post> {
        self.list_published()
            .filter(move |post| post.document.tags().contains(tag))
    }

    /// Tags of published posts with the number of posts using each.
    pub fn tags(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for post in self.list_published() {
            for tag in post.document.tags().iter() {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Look up a post by exact slug.
    ///
    /// Unpublished posts are only returned for [`Visibility::Preview`].
    pub fn get(&self, slug: &str, visibility: Visibility) -> Result<&Post, ContentError> {
        self.slugs
            .get(slug)
            .map(|&index| &self.posts[index])
            .filter(|post| post.visible_to(visibility))
            .ok_or_else(|| ContentError::NotFound(slug.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
