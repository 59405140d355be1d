//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[base]`    | Site metadata (title, author, url)             |
//! | `[build]`   | Content/output paths, extensions, excerpts     |
//! | `[render]`  | Template hand-off (default layout, JSON style) |
//! | `[extra]`   | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//!
//! [build]
//! content = "content"
//! output = "public"
//! excerpt_length = 160
//!
//! [render]
//! default_layout = "post"
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod render;

pub use base::BaseConfig;
pub use build::BuildConfig;
pub use render::RenderConfig;

use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Template hand-off settings
    #[serde(default)]
    pub render: RenderConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());

        if let Commands::Build { build_args } = &cli.command {
            Self::update_option(&mut self.build.output, build_args.output.as_ref());
            Self::update_option(&mut self.build.drafts, build_args.drafts.as_ref());
            Self::update_option(
                &mut self.build.excerpt_length,
                build_args.excerpt_length.as_ref(),
            );
            self.build.clean |= build_args.clean;
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before ingesting content
    pub fn validate(&self) -> Result<()> {
        let content = &self.build.content;
        if !content.exists() {
            bail!(ConfigError::Validation(format!(
                "[build.content] `{}` not found",
                content.display()
            )));
        }
        if !content.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[build.content] `{}` is not a directory",
                content.display()
            )));
        }

        if self.build.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "[build.extensions] must have at least one element".into()
            ));
        }

        if self.build.excerpt_length == 0 {
            bail!(ConfigError::Validation(
                "[build.excerpt_length] must be greater than 0".into()
            ));
        }

        if self.render.default_layout.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[render.default_layout] must not be empty".into()
            ));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
