//! CLI administration tool for the redirect store.
//!
//! Reads and writes the redb store file directly, so the server must not be
//! running against the same file (the store holds an exclusive lock).
//!
//! # Usage
//!
//! ```bash
//! # Add or replace a redirect
//! cargo run --bin admin -- add /google https://www.google.com
//!
//! # Show where a path points
//! cargo run --bin admin -- get /google
//!
//! # Remove a redirect
//! cargo run --bin admin -- remove /google
//!
//! # List everything in the bucket
//! cargo run --bin admin -- list
//!
//! # Insert the sample records
//! cargo run --bin admin -- seed
//!
//! # Validate a YAML redirect file
//! cargo run --bin admin -- check redirects.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_PATH`, `STORE_BUCKET`, `STORE_MODE` - same meaning as for the server
//!   (also accepted as `--store`, `--bucket` and `--mode`)

use urlshort::config::{DEFAULT_STORE_BUCKET, DEFAULT_STORE_PATH, parse_mode};
use urlshort::domain::entities::build_mapping;
use urlshort::infrastructure::persistence::KvStore;
use urlshort::infrastructure::redirects::yaml;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

/// Records inserted by `seed`.
const SAMPLE_RECORDS: &[(&str, &str)] = &[
    ("/google", "https://www.google.es"),
    ("/amazon", "https://www.amazon.es"),
];

/// CLI tool for managing stored redirects.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store file
    #[arg(long, env = "STORE_PATH", default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Bucket holding the redirects
    #[arg(long, env = "STORE_BUCKET", default_value = DEFAULT_STORE_BUCKET)]
    bucket: String,

    /// Octal permission bits for a newly created store file
    #[arg(long, env = "STORE_MODE", default_value = "600", value_parser = parse_mode)]
    mode: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or replace a redirect
    Add {
        /// Short path, e.g. "/google"
        path: String,

        /// Destination URL; an empty string stores a known path without destination
        url: String,
    },

    /// Show the destination of a path
    Get { path: String },

    /// Remove a redirect
    Remove {
        path: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all stored redirects
    List,

    /// Insert the sample records
    Seed,

    /// Decode a YAML redirect file and report its entries
    Check { file: PathBuf },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let Cli {
        store,
        bucket,
        mode,
        command,
    } = Cli::parse();

    let with_store = |op: &dyn Fn(&KvStore) -> Result<()>| -> Result<()> {
        let kv = KvStore::open(&store, mode, &bucket)
            .with_context(|| format!("Failed to open store {}", store.display()))?;
        let result = op(&kv);
        kv.close()?;
        result
    };

    match command {
        Commands::Add { path, url } => with_store(&|kv| add(kv, &path, &url)),
        Commands::Get { path } => with_store(&|kv| get(kv, &path)),
        Commands::Remove { path, yes } => with_store(&|kv| remove(kv, &path, yes)),
        Commands::List => with_store(&list),
        Commands::Seed => with_store(&seed),
        Commands::Check { file } => check_file(&file),
    }
}

fn add(store: &KvStore, path: &str, url: &str) -> Result<()> {
    if !path.starts_with('/') {
        println!("{}", format!("⚠️  Path '{path}' does not start with '/'").yellow());
    }
    if !url.is_empty() {
        url::Url::parse(url).with_context(|| format!("'{url}' is not an absolute URL"))?;
    }

    let previous = store.lookup(path)?;
    store.insert(path, url)?;

    if previous.is_empty() {
        println!("{} {} → {}", "✅ Added".green().bold(), path.cyan(), url);
    } else {
        println!(
            "{} {} → {} (was {})",
            "✅ Updated".green().bold(),
            path.cyan(),
            url,
            previous.bright_black()
        );
    }
    Ok(())
}

fn get(store: &KvStore, path: &str) -> Result<()> {
    let url = store.lookup(path)?;
    if url.is_empty() {
        println!("{} {}", "No redirect for".yellow(), path.cyan());
    } else {
        println!("{} → {}", path.cyan(), url.bright_white());
    }
    Ok(())
}

fn remove(store: &KvStore, path: &str, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove redirect {path}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    store.delete(path)?;
    println!("{} {}", "🗑️  Removed".green().bold(), path.cyan());
    Ok(())
}

/// Lists stored redirects.
///
/// ```text
/// 📋 Redirects in bucket 'url'
///
///   Path                           URL
///   ──────────────────────────────────────────────────────────────
///   /amazon                        https://www.amazon.es
///   /google                        https://www.google.es
/// ```
fn list(store: &KvStore) -> Result<()> {
    println!(
        "{}",
        format!("📋 Redirects in bucket '{}'", store.bucket())
            .bright_blue()
            .bold()
    );
    println!();

    let entries = store.entries()?;

    if entries.is_empty() {
        println!("{}", "  No redirects stored".yellow());
        println!();
        println!(
            "  Add one with: {} admin -- add /path https://example.com",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<30} {}",
        "Path".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(62).bright_black());

    for (path, url) in &entries {
        let url = if url.is_empty() {
            "(no destination)".bright_black()
        } else {
            url.normal()
        };
        println!("  {:<30} {}", path.cyan(), url);
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn seed(store: &KvStore) -> Result<()> {
    for (path, url) in SAMPLE_RECORDS {
        store.insert(path, url)?;
        println!("{} {} → {}", "✨ Seeded".green(), path.cyan(), url);
    }
    Ok(())
}

fn check_file(file: &Path) -> Result<()> {
    let entries = yaml::decode_file(file)
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    let declared = entries.len();
    let mapping = build_mapping(entries);

    println!(
        "{} {} ({} entries, {} distinct paths)",
        "✅ Valid".green().bold(),
        file.display(),
        declared,
        mapping.len()
    );

    if mapping.len() < declared {
        println!(
            "{}",
            "⚠️  Duplicate paths found; the last declaration of each wins".yellow()
        );
    }
    Ok(())
}
