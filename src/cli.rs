//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio markdown content pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the Build command
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Hand unpublished documents to templates as well
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub drafts: Option<bool>,

    /// Excerpt budget in characters
    #[arg(long = "excerpt-length")]
    pub excerpt_length: Option<usize>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Parse and validate all documents without writing anything
    Check,

    /// Validate all documents and write data files for the templating layer
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// List documents, newest first
    List {
        /// Only documents carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Include unpublished documents
        #[arg(short, long)]
        drafts: bool,
    },

    /// Print one document as JSON
    Show {
        /// Document slug
        slug: String,

        /// Allow unpublished documents
        #[arg(short, long)]
        preview: bool,

        /// Print the raw source file instead of the record
        #[arg(short, long)]
        source: bool,

        /// Print the source with its front matter rewritten in canonical form
        #[arg(short, long, conflicts_with = "source")]
        normalized: bool,
    },
}
