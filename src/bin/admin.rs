//! CLI administration tool for cutlink.
//!
//! Creates and inspects short links and uploads local files without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Create a short link (generated or custom code)
//! cargo run --bin admin -- link create https://example.com/long/path
//! cargo run --bin admin -- link create https://example.com --custom promo
//!
//! # Look up a code, count stored links
//! cargo run --bin admin -- link resolve promo
//! cargo run --bin admin -- link count
//!
//! # Upload files and print a short link for each
//! cargo run --bin admin -- upload ./report.pdf ./photo.png
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` parts): PostgreSQL connection string
//! - `DISK_TOKEN` and the rest of the server configuration for `link create`
//!   and `upload`

use cutlink::application::services::{IngestionPipeline, LinkService, UploadService};
use cutlink::config::{self, Config};
use cutlink::domain::code_generator::RandomCodeGenerator;
use cutlink::domain::entities::{FileOutcome, FilePayload};
use cutlink::infrastructure::persistence::PgLinkRegistry;
use cutlink::infrastructure::storage::DiskStore;
use cutlink::utils::upload_filename::{has_allowed_extension, sanitize_filename};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Root used when `BASE_URL` is not configured.
const FALLBACK_ROOT: &str = "http://localhost:3000/";

/// CLI tool for managing cutlink.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Upload local files and create a short link for each
    Upload {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

/// Short link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Original URL
        url: String,

        /// Custom short code (generated if omitted)
        #[arg(short, long)]
        custom: Option<String>,
    },

    /// Show the original URL for a code
    Resolve {
        code: String,
    },

    /// Count stored links
    Count,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Db { action } => handle_db_action(action).await?,
        Commands::Link { action } => handle_link_action(action).await?,
        Commands::Upload { paths, yes } => upload_files(paths, yes).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn link_service(pool: PgPool, config: Option<&Config>) -> LinkService {
    let registry = Arc::new(PgLinkRegistry::new(Arc::new(pool)));
    let settings = config
        .map(Config::allocation_settings)
        .unwrap_or_default();

    LinkService::with_generator(registry, Arc::new(RandomCodeGenerator), settings)
}

fn public_root(config: &Config) -> String {
    config
        .base_url
        .clone()
        .unwrap_or_else(|| FALLBACK_ROOT.to_string())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = connect().await?;
            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

/// Dispatches short link commands.
async fn handle_link_action(action: LinkAction) -> Result<()> {
    match action {
        LinkAction::Create { url, custom } => {
            let config = config::load_from_env()?;
            let service = link_service(connect().await?, Some(&config));

            let link = service
                .create_short_link(&url, custom.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create short link: {}", e))?;

            println!("{}", "✅ Short link created".green().bold());
            println!("  Code:     {}", link.short.cyan());
            println!("  Original: {}", link.original.bright_white());
            println!(
                "  Link:     {}",
                service.short_url(&public_root(&config), &link.short).bright_green()
            );
        }
        LinkAction::Resolve { code } => {
            let service = link_service(connect().await?, None);

            match service.resolve(&code).await {
                Ok(link) => {
                    println!("  {} → {}", link.short.cyan(), link.original.bright_white());
                    println!(
                        "  Created: {}",
                        link.created_at
                            .format("%Y-%m-%d %H:%M")
                            .to_string()
                            .bright_black()
                    );
                }
                Err(e) => println!("{} {}", "❌".red(), e.to_string().red()),
            }
        }
        LinkAction::Count => {
            let service = link_service(connect().await?, None);
            let count = service
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            println!("  Links: {}", count.to_string().bright_green().bold());
        }
    }

    Ok(())
}

/// Uploads files from disk, mirroring `POST /files`.
///
/// Every path is checked before anything is sent; one bad path aborts the
/// whole batch.
async fn upload_files(paths: Vec<PathBuf>, skip_confirm: bool) -> Result<()> {
    let config = config::load_from_env()?;

    if paths.len() > config.max_upload_files {
        anyhow::bail!("At most {} files per upload", config.max_upload_files);
    }

    let mut files = Vec::with_capacity(paths.len());
    let mut seen = HashSet::new();
    for path in &paths {
        let filename = sanitize_filename(&path.to_string_lossy())
            .with_context(|| format!("Not a file name: {}", path.display()))?;

        if !has_allowed_extension(&filename) {
            anyhow::bail!("File type is not allowed: {}", filename);
        }

        if !seen.insert(filename.clone()) {
            anyhow::bail!("Duplicate file name: {}", filename);
        }

        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        files.push(FilePayload::new(filename, content));
    }

    println!("{}", "📤 Upload files".bright_blue().bold());
    for file in &files {
        println!(
            "  {} ({} bytes)",
            file.filename.cyan(),
            file.content.len().to_string().bright_black()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Upload these files?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let store = DiskStore::new(
        &config.disk_api_url,
        &config.disk_token,
        config.disk_timeout(),
    )?;
    let links = Arc::new(link_service(connect().await?, Some(&config)));
    let pipeline = IngestionPipeline::new(Arc::new(store), config.disk_timeout());
    let service = UploadService::new(pipeline, links.clone());

    let root = public_root(&config);
    let outcomes = service.upload_and_shorten(files).await;
    let failed = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, FileOutcome::Failed { .. }))
        .count();

    for outcome in &outcomes {
        match outcome {
            FileOutcome::Shortened { filename, link } => println!(
                "  {} {} → {}",
                "✅".green(),
                filename.cyan(),
                links.short_url(&root, &link.short).bright_green()
            ),
            FileOutcome::Failed { filename, reason } => {
                println!("  {} {}: {}", "❌".red(), filename.cyan(), reason.red())
            }
        }
    }

    println!();
    println!(
        "  Uploaded: {}  Failed: {}",
        (outcomes.len() - failed).to_string().bright_green().bold(),
        failed.to_string().red().bold()
    );

    Ok(())
}
