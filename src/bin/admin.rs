//! CLI administration tool for quicklink.
//!
//! Runs the same registrar, resolver and stats services as the HTTP server,
//! directly against the database.
//!
//! # Usage
//!
//! ```bash
//! # Register a link
//! cargo run --bin admin -- register https://example.com --slug docs --expires-in-days 30
//!
//! # Resolve a code (counts a click)
//! cargo run --bin admin -- resolve docs
//!
//! # Per-link statistics, or totals when no code is given
//! cargo run --bin admin -- stats docs
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL` (optional): prefix of printed short URLs

use quicklink::application::services::{
    RegisterRequest, RegistrarService, ResolverService, StatsService,
};
use quicklink::clock::SystemClock;
use quicklink::domain::repositories::MappingRepository;
use quicklink::infrastructure::persistence::PgMappingRepository;
use quicklink::utils::code_generator::{CodeStrategy, DEFAULT_MAX_ATTEMPTS};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing quicklink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Register a URL and print its short code
    Register {
        /// The URL to shorten
        url: String,

        /// Custom short code (ASCII letters and digits)
        #[arg(short, long)]
        slug: Option<String>,

        /// Lifetime in days (0 expires immediately after creation)
        #[arg(short, long)]
        expires_in_days: Option<i64>,

        /// Code strategy when no slug is given: sequential or random
        #[arg(long, default_value = "random")]
        strategy: CodeStrategy,
    },

    /// Resolve a short code (counts a click)
    Resolve {
        /// Short code to resolve
        code: String,
    },

    /// Show statistics for a code, or totals
    Stats {
        /// Short code; omit for store-wide totals
        code: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let base_url = std::env::var("BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string())
        .trim_end_matches('/')
        .to_string();

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repository: Arc<dyn MappingRepository> =
        Arc::new(PgMappingRepository::new(Arc::new(pool.clone())));

    let result = match cli.command {
        Commands::Register {
            url,
            slug,
            expires_in_days,
            strategy,
        } => {
            let request = RegisterRequest {
                url,
                slug,
                expires_in_days,
            };
            register(repository, strategy, request, &base_url).await
        }
        Commands::Resolve { code } => resolve(repository, &code).await,
        Commands::Stats { code: Some(code) } => show_link_stats(repository, &code).await,
        Commands::Stats { code: None } => handle_stats(&pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

/// Registers a URL and prints the short link.
async fn register(
    repository: Arc<dyn MappingRepository>,
    strategy: CodeStrategy,
    request: RegisterRequest,
    base_url: &str,
) -> Result<()> {
    println!("{}", "🔗 Register Short Link".bright_blue().bold());
    println!();

    let registrar = RegistrarService::new(
        repository,
        Arc::new(SystemClock),
        strategy,
        DEFAULT_MAX_ATTEMPTS,
    );

    let mapping = registrar
        .register(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register: {}", e))?;

    println!("  URL:     {}", mapping.original_url.cyan());
    println!("  Code:    {}", mapping.short_code.bright_yellow().bold());
    println!(
        "  Link:    {}",
        format!("{}/r/{}", base_url, mapping.short_code).bright_white()
    );
    match mapping.expires_at {
        Some(at) => println!(
            "  Expires: {}",
            at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
        ),
        None => println!("  Expires: {}", "never".bright_black()),
    }
    println!();
    println!("{}", "✅ Registered successfully!".green().bold());

    Ok(())
}

/// Resolves a code like a redirect would, counting the click.
async fn resolve(repository: Arc<dyn MappingRepository>, code: &str) -> Result<()> {
    let resolver = ResolverService::new(repository, Arc::new(SystemClock));

    let mapping = resolver
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve '{}': {}", code, e))?;

    println!("{} → {}", code.bright_yellow(), mapping.original_url.cyan());
    println!(
        "  Clicks: {}",
        mapping.clicks.to_string().bright_green().bold()
    );

    Ok(())
}

/// Displays metadata and click count of one link.
async fn show_link_stats(repository: Arc<dyn MappingRepository>, code: &str) -> Result<()> {
    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();

    let stats_service = StatsService::new(repository, Arc::new(SystemClock));
    let stats = stats_service
        .stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load stats for '{}': {}", code, e))?;

    let mapping = &stats.mapping;
    let status = if stats.expired {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  Code:    {}", mapping.short_code.bright_yellow());
    println!("  URL:     {}", mapping.original_url.cyan());
    println!(
        "  Clicks:  {}",
        mapping.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created: {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    if let Some(at) = mapping.expires_at {
        println!(
            "  Expires: {}",
            at.format("%Y-%m-%d %H:%M").to_string().bright_black()
        );
    }
    println!("  Status:  {}", status);
    println!();

    Ok(())
}

/// Displays store-wide totals.
///
/// Shows:
/// - Total number of links
/// - Total number of clicks
/// - Number of expired links
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count, expired_count): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COALESCE(SUM(clicks), 0)::BIGINT,
            COUNT(*) FILTER (WHERE expires_at < NOW())
        FROM url_mappings
        WHERE short_code IS NOT NULL
        "#,
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:  {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Expired: {}",
        expired_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
