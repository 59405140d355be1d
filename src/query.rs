//! Read-only commands over an ingested registry: `list` and `show`.
//!
//! Both write to the given sink (stdout in practice) so the output can be
//! piped into other tools.

use crate::{
    content::{Post, Registry, Visibility, frontmatter},
    render::Renderer,
};
use anyhow::Result;
use std::io::Write;

/// Print one line per post: `date  slug  title`. Returns the number of lines.
pub fn list_posts(
    registry: &Registry,
    tag: Option<&str>,
    drafts: bool,
    out: &mut impl Write,
) -> Result<usize> {
    let posts: Vec<&Post> = match (tag, drafts) {
        (Some(tag), false) => registry.find_by_tag(tag).collect(),
        (None, false) => registry.list_published().collect(),
        (tag, true) => registry
            .list_all()
            .filter(|post| tag.is_none_or(|tag| post.document().tags().contains(tag)))
            .collect(),
    };

    for post in &posts {
        let document = post.document();
        write!(out, "{}  {}  {}", document.date(), post.slug(), post.title())?;
        if !post.published() {
            write!(out, "  (draft)")?;
        }
        writeln!(out)?;
    }

    Ok(posts.len())
}

/// What `show` prints for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowFormat {
    /// The render record as JSON.
    #[default]
    Record,
    /// The source file exactly as authored.
    Source,
    /// The source with its front matter re-serialized.
    Normalized,
}

/// Print a post in the requested format.
pub fn show_post(
    registry: &Registry,
    renderer: &Renderer,
    slug: &str,
    visibility: Visibility,
    format: ShowFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        ShowFormat::Record => {
            let record = renderer.get(registry, slug, visibility)?;
            writeln!(out, "{}", renderer.to_json(&record)?)?;
        }
        ShowFormat::Source => {
            let post = registry.get(slug, visibility)?;
            out.write_all(post.document().raw().as_bytes())?;
        }
        ShowFormat::Normalized => {
            let document = registry.get(slug, visibility)?.document();
            let source = frontmatter::to_source(document.metadata(), document.body())?;
            out.write_all(source.as_bytes())?;
        }
    }
    Ok(())
}
