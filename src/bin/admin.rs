//! CLI administration tool for link-redirector.
//!
//! Inspects links and their cache entries, and evicts stale cache entries
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored link record
//! cargo run --bin admin -- link show abc123
//!
//! # Show the cached entry and its remaining TTL
//! cargo run --bin admin -- cache show abc123
//!
//! # Drop the cached entry (asks for confirmation)
//! cargo run --bin admin -- cache evict abc123
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`) and `REDIS_URL` (or `REDIS_*`).

use link_redirector::config::{Config, mask_connection_string};
use link_redirector::domain::repositories::LinkRepository;
use link_redirector::infrastructure::cache::{CacheEntry, CacheStore, RedisCache};
use link_redirector::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-redirector.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect stored links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Inspect or evict cache entries
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show the stored record for a slug
    Show { slug: String },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show the cached entry for a slug
    Show { slug: String },

    /// Delete the cached entry for a slug
    Evict {
        slug: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn connect_db(config: &Config) -> Result<PgPool> {
    PgPool::connect(&config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&config.database_url)
            )
        })
}

async fn connect_cache(config: &Config) -> Result<RedisCache> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL or REDIS_HOST must be set for cache commands")?;

    RedisCache::connect(redis_url)
        .await
        .context("Failed to connect to Redis")
}

async fn handle_link_action(action: LinkAction, config: &Config) -> Result<()> {
    let LinkAction::Show { slug } = action;

    let pool = connect_db(config).await?;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .find_by_slug(&slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load link: {}", e))?;

    let Some(link) = link else {
        println!("{} {}", "❌ No link with slug".red(), slug.bold());
        return Ok(());
    };

    println!("{}", "🔗 Link".bright_blue().bold());
    println!();
    println!("  ID:          {}", link.id);
    println!("  Slug:        {}", link.slug.cyan());
    println!("  URL:         {}", link.original_url.bright_white());
    println!(
        "  Active:      {}",
        if link.is_active {
            "yes".green()
        } else {
            "no".red()
        }
    );
    println!(
        "  Password:    {}",
        if link.is_protected() {
            "set".yellow()
        } else {
            "unset".bright_black()
        }
    );
    println!("  Owner:       {}", link.owner_id.as_deref().unwrap_or("-"));
    println!(
        "  Created:     {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(expires_at) = link.expires_at {
        println!(
            "  Expires:     {} {}",
            expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
            "(not enforced on redirect)".bright_black()
        );
    }
    println!("  Clicks:      {}", link.click_count);
    if let Some(notes) = &link.notes {
        println!("  Notes:       {}", notes);
    }
    println!();

    Ok(())
}

async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let cache = connect_cache(config).await?;

    match action {
        CacheAction::Show { slug } => show_cache_entry(&cache, &slug).await?,
        CacheAction::Evict { slug, yes } => evict_cache_entry(&cache, &slug, yes).await?,
    }

    Ok(())
}

/// Prints the decoded cache entry for `slug` and its remaining TTL.
///
/// # Output Format
///
/// ```text
/// 🗄  Cache entry for abc123
///
///   Kind:      link
///   URL:       https://example.com
///   Active:    yes
///   Password:  unset
///   TTL:       604793s
/// ```
async fn show_cache_entry(cache: &RedisCache, slug: &str) -> Result<()> {
    let entry = cache
        .get(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read cache: {}", e))?;
    let ttl = cache
        .ttl(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read TTL: {}", e))?;

    println!(
        "{} {}",
        "🗄  Cache entry for".bright_blue().bold(),
        slug.cyan()
    );
    println!();

    match entry {
        CacheEntry::Absent => {
            println!("  {}", "No entry (next request goes to the database)".yellow());
            println!();
            return Ok(());
        }
        CacheEntry::Negative => {
            println!("  Kind:      {}", "not found marker".magenta());
        }
        CacheEntry::Positive(snapshot) => {
            println!("  Kind:      {}", "link".green());
            println!("  URL:       {}", snapshot.original_url.bright_white());
            println!(
                "  Active:    {}",
                if snapshot.is_active {
                    "yes".green()
                } else {
                    "no".red()
                }
            );
            println!(
                "  Password:  {}",
                if snapshot.password_hash.is_some() {
                    "set".yellow()
                } else {
                    "unset".bright_black()
                }
            );
        }
    }

    match ttl {
        Some(ttl) => println!("  TTL:       {}s", ttl.as_secs()),
        None => println!("  TTL:       {}", "none".bright_black()),
    }
    println!();

    Ok(())
}

async fn evict_cache_entry(cache: &RedisCache, slug: &str, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Evict cache entry for '{}'?", slug))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    cache
        .evict(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to evict: {}", e))?;

    println!("{}", "✅ Cache entry evicted".green().bold());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = connect_db(config).await?;
            let repo = PgLinkRepository::new(Arc::new(pool));

            if repo.health_check().await {
                println!("{}", "✅ Database connection OK".green().bold());
            } else {
                anyhow::bail!("Database did not answer SELECT 1");
            }
        }
    }

    Ok(())
}
