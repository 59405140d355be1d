//! Content ingestion and data hand-off orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── ingest()
//!     │       │
//!     │       ├── collect_content_files() ──► sorted document paths
//!     │       │
//!     │       ├── read + parse + validate  (parallel, rayon)
//!     │       │
//!     │       └── Registry::add()          (sequential, path order)
//!     │
//!     └── Renderer::write() ──► JSON data files in the output directory
//! ```
//!
//! Failure is fail-fast: the first failing file in path order aborts the run.

use crate::{
    config::{BuildConfig, SiteConfig},
    content::{Document, Registry, SourceError},
    log,
    render::Renderer,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

/// Files that should be ignored during content discovery
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Hidden files and directories below the content root are skipped.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Collect document files under the content directory, sorted by path.
///
/// Symlinks are followed. Any entry that cannot be read fails the whole walk.
pub fn collect_content_files(config: &BuildConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(&config.content)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.with_context(|| {
            format!("Failed to walk content directory: {}", config.content.display())
        })?;
        let name = entry.file_name().to_str().unwrap_or_default();
        if entry.file_type().is_file()
            && !IGNORED_FILES.contains(&name)
            && config.is_document(entry.path())
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Read and validate a single document.
fn load_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Document::parse(path.to_path_buf(), raw)?)
}

/// Parse every document under the content directory into a registry.
pub fn ingest(config: &SiteConfig) -> Result<Registry> {
    let files = collect_content_files(&config.build)?;
    log!("content"; "found {} documents", files.len());

    let documents: Vec<Result<Document>> =
        files.par_iter().map(|path| load_document(path)).collect();

    let mut registry = Registry::new(config.build.excerpt_length);
    for (path, document) in files.iter().zip(documents) {
        registry
            .add(document?)
            .map_err(|error| SourceError::new(path.clone(), error))?;
    }

    Ok(registry)
}

/// Ingest content and write hand-off data for the templating layer.
///
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<Registry> {
    let output = &config.build.output;
    let registry = ingest(config)?;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }

    let written = Renderer::new(config.render.clone())
        .with_drafts(config.build.drafts)
        .write(&registry, config, output)?;

    if registry.is_empty() {
        log!("warn"; "no documents found, check [build.content] and [build.extensions]");
    } else {
        let published = registry.list_published().count();
        log!("build"; "{} published, {} drafts", published, registry.len() - published);
    }
    log!("build"; "wrote {} files to {}", written, output.display());

    Ok(registry)
}
