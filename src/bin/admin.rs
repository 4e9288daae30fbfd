//! CLI administration tool for popx-links.
//!
//! Creates and inspects ads and checks the database without going through
//! the HTTP surface.
//!
//! # Usage
//!
//! ```bash
//! # Create an ad (prompts for missing fields)
//! cargo run --bin admin -- ad create --title "Bolo de Chocolate" --price 39.90 --whatsapp 5511999999999
//!
//! # List the newest ads
//! cargo run --bin admin -- ad list --limit 20
//!
//! # Show one ad with its landing URLs
//! cargo run --bin admin -- ad show bolo-de-chocolate-600123
//!
//! # Counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`popx_links::config`].

use popx_links::api::dto::ad_input::AdInput;
use popx_links::application::services::AdService;
use popx_links::config::{self, Config};
use popx_links::domain::entities::Ad;
use popx_links::domain::repositories::AdRepository;
use popx_links::infrastructure::persistence::PgAdRepository;
use popx_links::infrastructure::storage::S3ObjectStorage;
use popx_links::utils::money::format_brl;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing popx-links.
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
    /// Manage ads
    Ad {
        #[command(subcommand)]
        action: AdAction,
    },

    /// Show ad counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Ad subcommands.
#[derive(Subcommand)]
enum AdAction {
    /// Create an ad without an upload (placeholder or external image)
    Create {
        #[arg(short, long)]
        title: Option<String>,

        /// Price, `39.90` or `39,90`
        #[arg(short, long)]
        price: Option<String>,

        /// WhatsApp number with country and area code
        #[arg(short, long)]
        whatsapp: Option<String>,

        #[arg(short, long)]
        desc: Option<String>,

        /// Date-time or `{N}h`; defaults to 24 hours from now
        #[arg(short, long)]
        expires: Option<String>,

        #[arg(long)]
        image_url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List ads, newest first
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: i64,

        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },

    /// Show one ad
    Show { slug: String },
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

    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Ad { action } => handle_ad_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches ad commands.
async fn handle_ad_action(action: AdAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgAdRepository::new(Arc::new(pool.clone())));

    match action {
        AdAction::Create {
            title,
            price,
            whatsapp,
            desc,
            expires,
            image_url,
            yes,
        } => {
            let input = AdInput {
                title,
                price,
                whatsapp,
                desc,
                expires,
                image_url,
            };
            create_ad(repo, config, input, yes).await?;
        }
        AdAction::List { limit, offset } => list_ads(repo, limit, offset).await?,
        AdAction::Show { slug } => show_ad(repo, config, &slug).await?,
    }

    Ok(())
}

/// Creates an ad the same way `GET /api/quick` does.
///
/// Missing required fields are prompted for.
async fn create_ad(
    repo: Arc<PgAdRepository>,
    config: &Config,
    mut input: AdInput,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "📝 Create Ad".bright_blue().bold());
    println!();

    input.title = Some(prompt_if_missing(input.title, "Title")?);
    input.price = Some(prompt_if_missing(input.price, "Price")?);
    input.whatsapp = Some(prompt_if_missing(input.whatsapp, "WhatsApp")?);

    let request = input
        .into_request()
        .map_err(|e| anyhow::anyhow!("Invalid ad: {}", e))?;

    println!();
    println!("{}", "Ad details:".bright_white().bold());
    println!("  Title:    {}", request.title.cyan());
    println!("  Price:    {}", format_brl(request.price).cyan());
    println!("  WhatsApp: {}", request.whatsapp.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this ad?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let storage = Arc::new(S3ObjectStorage::connect(&config.storage).await);
    let service = AdService::new(repo, storage, config.max_upload_bytes);

    let ad = service
        .create_quick(request, Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create ad: {}", e))?;

    println!();
    println!("{}", "✅ Ad created successfully!".green().bold());
    println!("  Slug: {}", ad.slug.bright_yellow());
    if let Some(site_url) = &config.site_url {
        println!("  URL:  {}/{}", site_url, ad.slug.bright_yellow());
    }
    println!();

    Ok(())
}

/// Lists ads with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Ads
///
///   Slug                                     Price           Expires            Status
///   ────────────────────────────────────────────────────────────────────────────────────
///   bolo-de-chocolate-600123                 R$ 39,90        2025-08-02 12:00   ACTIVE
/// ```
async fn list_ads(repo: Arc<PgAdRepository>, limit: i64, offset: i64) -> Result<()> {
    println!("{}", "📋 Ads".bright_blue().bold());
    println!();

    let ads = repo
        .list(limit, offset)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list ads: {}", e))?;

    if ads.is_empty() {
        println!("{}", "  No ads found".yellow());
        println!();
        println!(
            "  Create one with: {} admin ad create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<40} {:<15} {:<18} {:<10}",
        "Slug".bright_white().bold(),
        "Price".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(86).bright_black());

    let now = Utc::now();
    for ad in &ads {
        println!(
            "  {:<40} {:<15} {:<18} {}",
            ad.slug.cyan(),
            format_brl(ad.price),
            expires_label(ad).bright_black(),
            status_label(ad, now)
        );
    }

    println!();
    println!("  Shown: {}", ads.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Shows one ad with both landing URLs.
async fn show_ad(repo: Arc<PgAdRepository>, config: &Config, slug: &str) -> Result<()> {
    let ad = repo
        .find_by_slug(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Ad not found")?;

    println!("{}", "🔎 Ad".bright_blue().bold());
    println!();
    println!("  ID:          {}", ad.id.to_string().bright_black());
    println!("  Slug:        {}", ad.slug.cyan());
    println!("  Title:       {}", ad.title);
    println!("  Price:       {}", format_brl(ad.price));
    println!("  WhatsApp:    {}", ad.whatsapp);
    println!(
        "  Image:       {}",
        ad.image_url.as_deref().unwrap_or("(placeholder)")
    );
    println!("  Created:     {}", ad.created_at.format("%Y-%m-%d %H:%M"));
    println!("  Expires:     {}", expires_label(&ad));
    println!("  Status:      {}", status_label(&ad, Utc::now()));

    if let Some(site_url) = &config.site_url {
        println!();
        println!("  Landing:     {}/{}", site_url, ad.slug);
        println!("  Alternate:   {}/a/{}", site_url, ad.slug);
    }
    println!();

    Ok(())
}

/// Displays ad counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgAdRepository::new(Arc::new(pool.clone()));
    let total = repo
        .count(None)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count ads: {}", e))?;
    let visible = repo
        .count(Some(Utc::now()))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count ads: {}", e))?;

    println!("  Ads:     {}", total.to_string().bright_green().bold());
    println!("  Visible: {}", visible.to_string().bright_green().bold());
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

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

fn expires_label(ad: &Ad) -> String {
    ad.expires_at
        .map(|e| e.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}

fn status_label(ad: &Ad, now: chrono::DateTime<Utc>) -> ColoredString {
    if !ad.published {
        "UNPUBLISHED".red()
    } else if ad.is_expired_at(now) {
        "EXPIRED".yellow()
    } else {
        "ACTIVE".green()
    }
}
