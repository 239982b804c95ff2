//! Smoke CLI over the cars persistence core.
//!
//! # Responsibility
//! - Open (and migrate) the configured database.
//! - Run the read queries of the repository layer and print results as JSON lines.

use anyhow::{anyhow, Context, Result};
use cars_core::{
    init_from_config, BrandRepository, CarsConfig, Database, PostRepository, Repositories,
    UserRepository,
};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "cars", version, about = "Cars marketplace store smoke tool")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file; overrides the configured path.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or migrate the database and report the schema version.
    Init,
    /// List every brand.
    Brands,
    /// List posts through one of the post queries.
    Posts {
        #[command(subcommand)]
        filter: Option<PostFilter>,
    },
    /// Case-insensitive login search.
    Users { key: String },
}

#[derive(Debug, Subcommand)]
enum PostFilter {
    All,
    /// Posts created within the last 24 hours.
    LastDay,
    WithPhoto,
    /// Posts whose car has exactly this brand name.
    Brand { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CarsConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(db) = cli.db {
        config.database.path = db;
    }
    init_from_config(&config.logging).map_err(|err| anyhow!("failed to init logging: {err}"))?;

    let db = Database::open_with_timeout(&config.database.path, config.database.busy_timeout())
        .with_context(|| format!("failed to open {}", config.database.path.display()))?;
    let db = Arc::new(db);
    let repos = Repositories::new(Arc::clone(&db));

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Init => {
            let version = db.schema_version()?;
            info!("event=cli_init module=cli status=ok schema_version={version}");
            writeln!(
                out,
                "{}",
                serde_json::json!({ "database": config.database.path, "schema_version": version })
            )?;
        }
        Command::Brands => print_lines(&mut out, &repos.brands.get_all_brands()?)?,
        Command::Posts { filter } => {
            let posts = match filter.unwrap_or(PostFilter::All) {
                PostFilter::All => repos.posts.get_all_posts()?,
                PostFilter::LastDay => repos.posts.get_all_posts_for_last_day()?,
                PostFilter::WithPhoto => repos.posts.get_all_posts_with_photo()?,
                PostFilter::Brand { name } => repos.posts.get_all_posts_with_specific_car_brand(&name)?,
            };
            print_lines(&mut out, &posts)?;
        }
        Command::Users { key } => print_lines(&mut out, &repos.users.find_by_like_login(&key)?)?,
    }
    Ok(())
}

fn print_lines<T: Serialize>(out: &mut impl Write, items: &[T]) -> Result<()> {
    for item in items {
        writeln!(out, "{}", serde_json::to_string(item)?)?;
    }
    Ok(())
}
