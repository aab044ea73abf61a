//! CLI administration tool for url-alias.
//!
//! Manages links and inspects storage directly, without going through the
//! HTTP API or its basic auth.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (random alias unless --alias is given)
//! cargo run --bin admin -- link create https://example.com --alias docs
//!
//! # Look up where an alias points
//! cargo run --bin admin -- link resolve docs
//!
//! # Remove an alias
//! cargo run --bin admin -- link delete docs
//!
//! # List the newest links
//! cargo run --bin admin -- link list --limit 20
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check storage
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `STORAGE_PATH`: SQLite database file (default: `./storage/storage.db`)
//! - `ALIAS_LENGTH`: Length of generated aliases (default: 8)

use url_alias::api::dto::save::SaveRequest;
use url_alias::application::services::{LinkError, LinkService};
use url_alias::config::{self, Config};
use url_alias::error::validation_message;
use url_alias::infrastructure::persistence::{SqliteLinkRepository, connect_pool, run_migrations};
use url_alias::utils::alias_generator::RandomAliasGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use validator::Validate;

type AdminLinkService = LinkService<SqliteLinkRepository, RandomAliasGenerator>;

/// CLI tool for managing url-alias.
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
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Storage operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// URL to shorten (prompted if omitted)
        url: Option<String>,

        /// Custom alias (random if omitted)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the URL stored under an alias
    Resolve {
        alias: String,
    },

    /// Delete a link
    Delete {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List the newest links
    List {
        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },
}

/// Storage operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check the storage connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    if let Some(dir) = Path::new(&config.storage_path).parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir).context("Failed to create storage directory")?;
    }

    let pool = connect_pool(&config.storage_path, &config.pool_settings())
        .await
        .context("Failed to open storage")?;

    run_migrations(&pool)
        .await
        .context("Failed to migrate storage")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &SqlitePool, config: &Config) -> Result<()> {
    let repo = Arc::new(SqliteLinkRepository::with_timeout(
        Arc::new(pool.clone()),
        config.storage_timeout(),
    ));
    let service = LinkService::new(
        repo,
        Arc::new(RandomAliasGenerator::new()),
        config.alias_length,
    );

    match action {
        LinkAction::Create { url, alias } => create_link(&service, url, alias).await?,
        LinkAction::Resolve { alias } => resolve_link(&service, &alias).await?,
        LinkAction::Delete { alias, yes } => delete_link(&service, &alias, yes).await?,
        LinkAction::List { limit } => list_links(&service, limit).await?,
    }

    Ok(())
}

/// Creates a link, prompting for the URL when it was not passed.
///
/// Creating a link for an already stored URL without `--alias` prints the
/// existing alias.
async fn create_link(
    service: &AdminLinkService,
    url: Option<String>,
    alias: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let request = validated_request(url, alias)?;
    let url = request.url.as_deref().unwrap_or_default();

    match service.create_short_link(url, request.requested_alias()).await {
        Ok(alias) => {
            println!("{}", "✅ Link ready".green().bold());
            println!("  Alias: {}", alias.bright_yellow().bold());
            println!("  URL:   {}", url.cyan());
            println!();
            Ok(())
        }
        Err(LinkError::Conflict(alias)) => {
            println!("{}", format!("⚠️  Alias '{alias}' is already taken").yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create link: {}", e)),
    }
}

/// Applies the same rules as `POST /url` to a CLI-supplied link.
fn validated_request(url: String, alias: Option<String>) -> Result<SaveRequest> {
    let request = SaveRequest {
        url: Some(url),
        alias,
    };

    request
        .validate()
        .map_err(|errors| anyhow::anyhow!(validation_message(&errors)))?;

    Ok(request)
}

/// Prints the URL stored under `alias`.
async fn resolve_link(service: &AdminLinkService, alias: &str) -> Result<()> {
    match service.resolve_short_link(alias).await {
        Ok(url) => {
            println!("  {} → {}", alias.bright_yellow(), url.cyan());
            Ok(())
        }
        Err(LinkError::NotFound) => {
            println!("{}", format!("⚠️  Alias '{alias}' not found").yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve link: {}", e)),
    }
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &AdminLinkService, alias: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let url = match service.resolve_short_link(alias).await {
        Ok(url) => url,
        Err(LinkError::NotFound) => {
            println!("{}", format!("⚠️  Alias '{alias}' not found").yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Storage error: {}", e)),
    };

    println!("  Alias: {}", alias.bright_yellow());
    println!("  URL:   {}", url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .remove_short_link(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Lists the newest links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   ID    Alias              URL
///   ──────────────────────────────────────────────────────────
///   2     docs               https://example.com/docs
///   1     qwertyui           https://example.com
/// ```
async fn list_links(service: &AdminLinkService, limit: i64) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<18} {}",
        "ID".bright_white().bold(),
        "Alias".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<18} {}",
            link.id.to_string().bright_black(),
            link.alias.cyan(),
            link.url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays storage statistics.
async fn handle_stats(pool: &SqlitePool, config: &Config) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(pool)
        .await?;

    let distinct_urls: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT url) FROM url")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Distinct URLs: {}",
        distinct_urls.to_string().bright_green().bold()
    );
    println!("  Storage:       {}", config.storage_path.bright_white());
    println!();

    Ok(())
}

/// Handles storage diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking storage...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Storage OK".green().bold());
            println!("  SQLite: {}", version.bright_white());
            println!("  File:   {}", config.storage_path.bright_white());
        }
    }

    Ok(())
}
