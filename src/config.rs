//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A `.env` file is honoured when present (loaded by the binaries via
//! `dotenvy`).
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `STORE_PATH` - Store file (default: `./bolt.db`)
//! - `STORE_BUCKET` - Bucket holding the redirects (default: `url`)
//! - `STORE_MODE` - Octal permission bits for a new store file (default: `600`)
//! - `REDIRECTS_FILE` - YAML redirect declarations (optional; built-in sample if unset)
//! - `STORE_ERROR_POLICY` - `fallback` or `surface` (default: `fallback`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::application::chain::StoreErrorPolicy;

pub const DEFAULT_STORE_PATH: &str = "./bolt.db";
pub const DEFAULT_STORE_BUCKET: &str = "url";
pub const DEFAULT_STORE_MODE: u32 = 0o600;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub store_path: PathBuf,
    pub store_bucket: String,
    /// Permission bits applied when the store file is created.
    pub store_mode: u32,
    pub redirects_file: Option<PathBuf>,
    /// How the store layer reacts to lookup failures during requests.
    pub store_error_policy: StoreErrorPolicy,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            store_bucket: DEFAULT_STORE_BUCKET.to_string(),
            store_mode: DEFAULT_STORE_MODE,
            redirects_file: None,
            store_error_policy: StoreErrorPolicy::default(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORE_MODE` is not an octal number or
    /// `STORE_ERROR_POLICY` is not a known policy.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let store_path = env::var("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);
        let store_bucket = env::var("STORE_BUCKET").unwrap_or(defaults.store_bucket);

        let store_mode = match env::var("STORE_MODE") {
            Ok(raw) => parse_mode(&raw).with_context(|| format!("Invalid STORE_MODE '{raw}'"))?,
            Err(_) => defaults.store_mode,
        };

        let redirects_file = env::var("REDIRECTS_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let store_error_policy = match env::var("STORE_ERROR_POLICY") {
            Ok(raw) => raw
                .parse::<StoreErrorPolicy>()
                .map_err(anyhow::Error::msg)?,
            Err(_) => defaults.store_error_policy,
        };

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            listen_addr,
            store_path,
            store_bucket,
            store_mode,
            redirects_file,
            store_error_policy,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `store_bucket` is empty
    /// - `store_mode` has bits outside `0o777` or denies the owner read/write
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.store_bucket.trim().is_empty() {
            anyhow::bail!("STORE_BUCKET must not be empty");
        }

        if self.store_mode > 0o777 {
            anyhow::bail!("STORE_MODE must be at most 777, got {:o}", self.store_mode);
        }

        if self.store_mode & 0o600 != 0o600 {
            anyhow::bail!(
                "STORE_MODE must grant the owner read and write, got {:o}",
                self.store_mode
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  Store: {} (bucket '{}', mode {:o})",
            self.store_path.display(),
            self.store_bucket,
            self.store_mode
        );
        match &self.redirects_file {
            Some(file) => tracing::info!("  Redirects file: {}", file.display()),
            None => tracing::info!("  Redirects file: built-in sample"),
        }
        tracing::info!("  Store error policy: {}", self.store_error_policy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses permission bits written in octal, with or without a `0o` or `0` prefix.
pub fn parse_mode(raw: &str) -> Result<u32> {
    let digits = raw.trim().trim_start_matches("0o");
    let digits = if digits.len() > 1 {
        digits.trim_start_matches('0')
    } else {
        digits
    };
    if digits.is_empty() {
        return Ok(0);
    }
    u32::from_str_radix(digits, 8).context("expected octal permission bits such as 600")
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
