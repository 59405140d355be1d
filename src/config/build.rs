//! `[build]` section configuration.
//!
//! Contains ingestion settings: where content lives, which files count as
//! documents, how long excerpts are, and where hand-off data goes.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[build]` section in folio.toml - ingestion configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory
/// output = "public"        # Hand-off data directory
/// extensions = ["md"]      # Document file extensions
/// excerpt_length = 160     # Excerpt budget in characters
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory (Markdown files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory for data handed to templates.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// File extensions treated as documents (case-insensitive, no dot).
    #[serde(default = "defaults::build::extensions")]
    #[educe(Default = defaults::build::extensions())]
    pub extensions: Vec<String>,

    /// Excerpt budget in characters.
    #[serde(default = "defaults::build::excerpt_length")]
    #[educe(Default = defaults::build::excerpt_length())]
    pub excerpt_length: usize,

    /// Also hand unpublished documents to templates (preview builds).
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub drafts: bool,

    /// Clear output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,
}

impl BuildConfig {
    /// Whether `path` has one of the configured document extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.extensions, vec!["md", "markdown"]);
        assert_eq!(config.build.excerpt_length, 200);
        assert!(!config.build.drafts);
        assert!(!config.build.clean);
    }

    #[test]
    fn test_build_config_custom() {
        let config = r#"
            [build]
            content = "posts"
            output = "dist/data"
            extensions = ["md", "mdx"]
            excerpt_length = 80
            drafts = true
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("posts"));
        assert_eq!(config.build.output, PathBuf::from("dist/data"));
        assert_eq!(config.build.extensions, vec!["md", "mdx"]);
        assert_eq!(config.build.excerpt_length, 80);
        assert!(config.build.drafts);
    }

    #[test]
    fn test_build_config_unknown_field() {
        let config = r#"
            [build]
            minify = true
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_document() {
        let config = SiteConfig::default();

        assert!(config.build.is_document(Path::new("content/a.md")));
        assert!(config.build.is_document(Path::new("content/b.MARKDOWN")));
        assert!(!config.build.is_document(Path::new("content/c.txt")));
        assert!(!config.build.is_document(Path::new("content/README")));
    }
}
