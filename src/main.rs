//! Folio - a Markdown content pipeline for blogs.

mod build;
mod cli;
mod config;
mod content;
mod logger;
mod query;
mod render;
mod utils;

use anyhow::Result;
use build::{build_site, ingest};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::Visibility;
use query::ShowFormat;
use render::Renderer;
use std::{io::stdout, path::Path, process::ExitCode};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch the selected subcommand.
fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Check => check(&config),
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::List { tag, drafts } => {
            let registry = ingest(&config)?;
            query::list_posts(&registry, tag.as_deref(), *drafts, &mut stdout().lock())?;
            Ok(())
        }
        Commands::Show {
            slug,
            preview,
            source,
            normalized,
        } => {
            let registry = ingest(&config)?;
            let renderer = Renderer::new(config.render.clone());
            let visibility = if *preview {
                Visibility::Preview
            } else {
                Visibility::Public
            };
            let format = match (*source, *normalized) {
                (true, _) => ShowFormat::Source,
                (_, true) => ShowFormat::Normalized,
                _ => ShowFormat::Record,
            };
            query::show_post(
                &registry,
                &renderer,
                slug,
                visibility,
                format,
                &mut stdout().lock(),
            )
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        log!("config"; "{} not found, using defaults", config_path.display());
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Ingest and validate everything without writing output.
fn check(config: &SiteConfig) -> Result<()> {
    let registry = ingest(config)?;
    let published = registry.list_published().count();

    log!(
        "check";
        "{} documents ok ({} published, {} drafts, {} tags)",
        registry.len(),
        published,
        registry.len() - published,
        registry.tags().len()
    );
    Ok(())
}
