//! Command-line interface for content-loader.
//!
//! Provides commands for loading the content document, listing its
//! articles, checking that it loads cleanly, and showing configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, ContentBase, LoaderConfig};
use crate::core::{ContentLoader, ContentStore};

/// content-loader - Load a static JSON content document
#[derive(Parser, Debug)]
#[command(name = "content-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Explicit config file (otherwise .content-loader/config.yaml is searched for)
    #[arg(long, global = true, env = "CONTENT_LOADER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL or directory the content path is resolved against
    #[arg(long, global = true)]
    pub base: Option<String>,

    /// Content path relative to the base
    #[arg(long, global = true)]
    pub path: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the content and print it as JSON (falls back to empty content)
    Fetch {
        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// List the articles in the content
    Articles {
        /// Maximum number of articles to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Load the content without fallback and report any error
    Check,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = self.resolve_config()?;

        match self.command {
            Commands::Fetch { compact } => fetch(&config, compact).await,
            Commands::Articles { limit } => list_articles(&config, limit).await,
            Commands::Check => check(&config).await,
            Commands::Config => show_config(&config),
        }
    }

    /// Config from file/env, with command-line flags on top
    fn resolve_config(&self) -> Result<LoaderConfig> {
        let mut config = match &self.config {
            Some(path) => config::load_config_from(path)?,
            None => config::load_config()?,
        };

        if let Some(ref base) = self.base {
            config.base = ContentBase::parse(base)?;
        }
        if let Some(ref path) = self.path {
            config.path = path.clone();
        }
        if self.timeout.is_some() {
            config.timeout_seconds = self.timeout;
        }

        Ok(config)
    }
}

/// Run the startup sequence and return the populated store
async fn load_store(config: &LoaderConfig) -> Result<ContentStore> {
    let loader = ContentLoader::from_config(config)
        .with_context(|| format!("Failed to set up source for {}", config.location()))?;

    let store = ContentStore::new();
    loader.init(&store).await?;
    Ok(store)
}

/// Print the loaded content
async fn fetch(config: &LoaderConfig, compact: bool) -> Result<()> {
    let store = load_store(config).await?;
    let content = store.get();

    let json = if compact {
        serde_json::to_string(&content)?
    } else {
        serde_json::to_string_pretty(&content)?
    };
    println!("{}", json);

    if let Some(outcome) = store.outcome() {
        eprintln!("[{}: {}]", config.location(), outcome);
    }

    Ok(())
}

/// Print a table of articles
async fn list_articles(config: &LoaderConfig, limit: usize) -> Result<()> {
    let store = load_store(config).await?;
    let articles = store.get().articles();

    if articles.is_empty() {
        println!("No articles found");
        return Ok(());
    }

    println!("{:<40} {:<12} {:<20} TAGS", "TITLE", "DATE", "AUTHOR");
    println!("{}", "-".repeat(90));

    for article in articles.iter().take(limit) {
        let title = if article.title.chars().count() > 38 {
            format!("{}...", article.title.chars().take(35).collect::<String>())
        } else {
            article.title.clone()
        };
        println!(
            "{:<40} {:<12} {:<20} {}",
            title,
            article.date,
            article.author,
            article.tags.join(", ")
        );
    }

    if articles.len() > limit {
        eprintln!("\n[{} more not shown]", articles.len() - limit);
    }

    Ok(())
}

/// Load without masking failures
async fn check(config: &LoaderConfig) -> Result<()> {
    let loader = ContentLoader::from_config(config)
        .with_context(|| format!("Failed to set up source for {}", config.location()))?;

    let content = loader
        .try_fetch()
        .await
        .with_context(|| format!("Content at {} did not load", loader.source().location()))?;

    println!(
        "OK: {} ({} articles)",
        loader.source().location(),
        content.article_count()
    );
    Ok(())
}

/// Show resolved configuration
fn show_config(config: &LoaderConfig) -> Result<()> {
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Base:        {}", config.base);
    println!("Path:        {}", config.path);
    println!("Location:    {}", config.location());
    match config.timeout_seconds {
        Some(secs) => println!("Timeout:     {}s", secs),
        None => println!("Timeout:     (transport default)"),
    }

    Ok(())
}
